use clap::Parser;

/// Renders the Pro pricing card for the configured visitor and optionally clicks it.
#[derive(Parser, Debug)]
#[command(name = "plan-checkout", version, about = "Pricing card state and checkout actions")]
pub struct CliArgs {
    /// Click the buy button after rendering.
    #[arg(long, conflicts_with = "manage")]
    pub buy: bool,

    /// Click "Manage Subscription" after rendering.
    #[arg(long)]
    pub manage: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Buy,
    Manage,
}

impl CliArgs {
    pub fn click(&self) -> Option<Click> {
        if self.buy {
            Some(Click::Buy)
        } else if self.manage {
            Some(Click::Manage)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_only_renders() {
        let args = CliArgs::try_parse_from(["plan-checkout"]).unwrap();
        assert_eq!(args.click(), None);
    }

    #[test]
    fn buy_flag_clicks_buy() {
        let args = CliArgs::try_parse_from(["plan-checkout", "--buy"]).unwrap();
        assert_eq!(args.click(), Some(Click::Buy));
    }

    #[test]
    fn manage_flag_clicks_manage() {
        let args = CliArgs::try_parse_from(["plan-checkout", "--manage"]).unwrap();
        assert_eq!(args.click(), Some(Click::Manage));
    }

    #[test]
    fn buy_and_manage_conflict() {
        assert!(CliArgs::try_parse_from(["plan-checkout", "--buy", "--manage"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(CliArgs::try_parse_from(["plan-checkout", "--refund"]).is_err());
    }
}
