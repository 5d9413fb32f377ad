// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.barcodes.is_none() {
            self.barcodes = config.barcodes;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }
        if let Some(outname) = config.outname.filter(|_| self.outname == "new_barcodes") {
            self.outname = outname;
        }
        if let Some(output_dir) = config.output_dir.filter(|_| self.output_dir == ".") {
            self.output_dir = output_dir;
        }

        // Design settings (only override defaults, not explicit CLI values)
        if let Some(klength) = config.klength.filter(|_| self.klength == 8) {
            self.klength = klength;
        }
        if let Some(new) = config.new.filter(|_| self.new == 0) {
            self.new = new;
        }
        if let Some(min_hamming) = config.min_hamming.filter(|_| self.min_hamming == 2) {
            self.min_hamming = min_hamming;
        }
        if let Some(max_tries) = config.max_tries.filter(|_| self.max_tries == 10) {
            self.max_tries = max_tries;
        }
        if let Some(max_homopolymer) = config.max_homopolymer.filter(|_| self.max_homopolymer == 3) {
            self.max_homopolymer = max_homopolymer;
        }
        if let Some(min_target) = config.min_target.filter(|_| self.min_target == 3.0) {
            self.min_target = min_target;
        }
        if self.seed.is_none() {
            self.seed = config.seed;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["bcdesign"], args).unwrap()
    }

    #[test]
    fn test_config_fills_defaults_only() {
        let args = parse(&["--klength", "10", "--new", "5"]);
        let config = Config {
            barcodes: Some("from_config.txt".to_string()),
            klength: Some(12),
            new: Some(50),
            min_hamming: Some(3),
            seed: Some(9),
            quiet: Some(true),
            ..Config::default()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.barcodes.as_deref(), Some("from_config.txt"));
        assert_eq!(merged.klength, 10);
        assert_eq!(merged.new, 5);
        assert_eq!(merged.min_hamming, 3);
        assert_eq!(merged.seed, Some(9));
        assert!(merged.quiet);
    }

    #[test]
    fn test_explicit_barcodes_win() {
        let args = parse(&["--barcodes", "cli.txt"]);
        let config = Config {
            barcodes: Some("from_config.txt".to_string()),
            ..Config::default()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.barcodes.as_deref(), Some("cli.txt"));
        assert_eq!(merged.outname, "new_barcodes");
    }
}
