// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// bcdesign - Evaluate a DNA barcode set and design new barcodes for it
pub struct Args {
    /// path to the barcode list, one barcode per line
    #[argh(option, short = 'b')]
    pub barcodes: Option<String>,

    /// number of new barcodes to design (default: 0)
    #[argh(option, short = 'n', default = "0")]
    pub new: usize,

    /// barcode length (default: 8)
    #[argh(option, short = 'k', default = "8")]
    pub klength: usize,

    /// minimum Hamming distance between any two barcodes (default: 2)
    #[argh(option, short = 'H', default = "2")]
    pub min_hamming: usize,

    /// file name, without extension, for the new barcodes (default: new_barcodes)
    #[argh(option, short = 'o', default = "String::from(\"new_barcodes\")")]
    pub outname: String,

    /// directory for all output files (default: current directory)
    #[argh(option, default = "String::from(\".\")")]
    pub output_dir: String,

    /// failed attempts before the median target is lowered by one (default: 10)
    #[argh(option, default = "10")]
    pub max_tries: usize,

    /// longest allowed run of one nucleotide (default: 3)
    #[argh(option, default = "3")]
    pub max_homopolymer: usize,

    /// give up on a barcode once the median target drops below this (default: 3.0)
    #[argh(option, default = "3.0")]
    pub min_target: f64,

    /// random seed for reproducible designs (default: from system entropy)
    #[argh(option)]
    pub seed: Option<u64>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// write a JSON run summary to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// hide the progress bar
    #[argh(switch, short = 'q')]
    pub quiet: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
