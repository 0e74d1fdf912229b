use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pfsverify")]
#[command(version)]
#[command(about = "Verify that a PFS0/NSP archive is complete", long_about = None)]
#[command(after_help = "Exit status:\n  \
  0  archive verified\n  \
  1  not a valid archive, or it could not be read\n  \
  2  archive incomplete\n  \
  3  archive has extra data\n\n\
Examples:\n  \
  pfsverify game.nsp                           verify a local archive\n  \
  pfsverify -q https://example.com/game.nsp    verify a remote archive, print only the verdict")]
pub struct Cli {
    /// NSP file path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List file names only, without verifying
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Do not display the verbose log, only the verdict
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
