use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::services::{DataLoader, GraphClient};
use crate::tui::{self, format, LaunchConfig};
use crate::types::DateWindow;

const DEFAULT_LLM_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Meta Ads performance dashboard with AI-assisted analysis
#[derive(Parser)]
#[command(name = "adlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Graph API access token
    #[arg(long, env = "ADLENS_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// Ad account id, with or without the act_ prefix
    #[arg(long, env = "ADLENS_ACCOUNT_ID", global = true)]
    account: Option<String>,

    /// Reporting window
    #[arg(long, value_enum, default_value_t = DateWindow::default(), global = true)]
    window: DateWindow,

    /// Messages endpoint for the analysis model
    #[arg(long, env = "ADLENS_LLM_ENDPOINT", default_value = DEFAULT_LLM_ENDPOINT, global = true)]
    llm_endpoint: String,

    /// API key for the analysis endpoint
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, global = true)]
    llm_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print the campaign table
    Campaigns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the ad table
    Ads {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the account summary
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the AI analysis and print it
    Analyze,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let token = self
            .access_token
            .clone()
            .context("access token required (--access-token or ADLENS_ACCESS_TOKEN)")?;
        let account = self
            .account
            .clone()
            .context("account id required (--account or ADLENS_ACCOUNT_ID)")?;

        match self.command {
            None | Some(Commands::Tui) => tui::run(LaunchConfig {
                access_token: token,
                account_id: account,
                window: self.window,
                llm_endpoint: self.llm_endpoint,
                llm_key: self.llm_key,
            }),
            Some(Commands::Campaigns { json }) => {
                let snap = self.load(&token, &account)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&snap.campaigns)?);
                } else {
                    print_campaigns(&snap);
                }
                Ok(())
            }
            Some(Commands::Ads { json }) => {
                let snap = self.load(&token, &account)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&snap.ads)?);
                } else {
                    print_ads(&snap);
                }
                Ok(())
            }
            Some(Commands::Summary { json }) => {
                let snap = self.load(&token, &account)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&snap.summary)?);
                } else {
                    print_summary(&snap);
                }
                Ok(())
            }
            Some(Commands::Analyze) => {
                let snap = self.load(&token, &account)?;
                let service =
                    crate::services::AnalysisService::new(&self.llm_endpoint, self.llm_key.clone())?;
                let prompt = crate::services::analysis::build_prompt(
                    &snap.account,
                    snap.window,
                    &snap.summary,
                    &snap.campaigns,
                    &snap.ads,
                );
                println!("{}", service.analyze(&prompt)?);
                Ok(())
            }
        }
    }

    fn load(&self, token: &str, account: &str) -> anyhow::Result<crate::services::AccountSnapshot> {
        let loader = DataLoader::new(GraphClient::new(token)?);
        let snap = loader.load(account, self.window, 0)?;
        if let Some(status) = snap.account.account_status {
            // 1 is the platform's "active" status code
            if status != 1 {
                eprintln!("[adlens] Warning: account status is {}, data may be stale", status);
            }
        }
        Ok(snap)
    }
}

fn print_campaigns(snap: &crate::services::AccountSnapshot) {
    println!(
        "{} — {} ({})",
        snap.account.name,
        snap.window.label(),
        snap.account.id
    );
    println!(
        "{:<32} {:<9} {:>10} {:>7} {:>9} {:>7} {:>8}",
        "CAMPAIGN", "STATUS", "SPEND", "ROAS", "CPA", "CTR", "PURCH"
    );
    let mut rows: Vec<_> = snap.campaigns.iter().collect();
    rows.sort_by(|a, b| b.metrics.spend.total_cmp(&a.metrics.spend));
    for c in rows {
        println!(
            "{:<32} {:<9} {:>10} {:>7} {:>9} {:>7} {:>8}",
            format::truncate(&c.name, 32),
            c.status,
            format::money(c.metrics.spend),
            format::times(c.metrics.roas),
            format::money(c.metrics.cpa),
            format::pct(c.metrics.ctr),
            format::count(c.metrics.purchases),
        );
    }
}

fn print_ads(snap: &crate::services::AccountSnapshot) {
    println!(
        "{} — {} ({})",
        snap.account.name,
        snap.window.label(),
        snap.account.id
    );
    println!(
        "{:<32} {:<10} {:>10} {:>7} {:>9} {:>7} {:>7} {:>7}",
        "AD", "CREATIVE", "SPEND", "ROAS", "CPA", "CTR", "HOOK", "HOLD"
    );
    let mut rows: Vec<_> = snap.ads.iter().collect();
    rows.sort_by(|a, b| b.metrics.spend.total_cmp(&a.metrics.spend));
    for ad in rows {
        println!(
            "{:<32} {:<10} {:>10} {:>7} {:>9} {:>7} {:>7} {:>7}",
            format::truncate(&ad.name, 32),
            format::truncate(&ad.creative_type, 10),
            format::money(ad.metrics.spend),
            format::times(ad.metrics.roas),
            format::money(ad.metrics.cpa),
            format::pct(ad.metrics.ctr),
            format::pct(ad.metrics.hook_rate),
            format::pct(ad.metrics.hold_rate),
        );
    }
}

fn print_summary(snap: &crate::services::AccountSnapshot) {
    let s = &snap.summary;
    println!(
        "{} — {} ({})",
        snap.account.name,
        snap.window.label(),
        snap.account.id
    );
    println!("Spend      {}", format::money(s.spend));
    println!("Revenue    {}", format::money(s.purchase_value));
    println!("ROAS       {}", format::times(s.roas));
    println!("CPA        {}", format::money(s.cpa));
    println!("Purchases  {}", format::count(s.purchases));
    println!("Leads      {}", format::count(s.leads));
    println!("CTR        {}", format::pct(s.ctr));
    println!("CPM        {}", format::money(s.cpm));
    println!("Hook rate  {}", format::pct(s.hook_rate));
    println!("Hold rate  {}", format::pct(s.hold_rate));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["adlens"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.window, DateWindow::Last30d);
    }

    #[test]
    fn test_cli_parse_campaigns_json() {
        let cli = Cli::try_parse_from(["adlens", "campaigns", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Campaigns { json: true })));
    }

    #[test]
    fn test_cli_parse_window() {
        let cli = Cli::try_parse_from(["adlens", "--window", "last_7d", "summary"]).unwrap();
        assert_eq!(cli.window, DateWindow::Last7d);
        assert!(matches!(cli.command, Some(Commands::Summary { json: false })));
    }

    #[test]
    fn test_cli_rejects_unknown_window() {
        assert!(Cli::try_parse_from(["adlens", "--window", "yesterday"]).is_err());
    }

    #[test]
    fn test_cli_default_llm_endpoint() {
        let cli = Cli::try_parse_from(["adlens"]).unwrap();
        assert_eq!(cli.llm_endpoint, DEFAULT_LLM_ENDPOINT);
    }
}
