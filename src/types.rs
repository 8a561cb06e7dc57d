use std::path::PathBuf;

use clap::Parser;

// CLI Args
#[derive(Parser, Debug)]
#[command(
   author,
   version,
   about = "Suggest a commit message for unstaged git changes using an LLM",
   long_about = None
)]
pub struct Args {
   /// Path to the git repository
   pub repo_path: PathBuf,

   /// Path to config file (default: ~/.config/git-suggest/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,

   /// Model identifier sent to the completion endpoint
   #[arg(long, short = 'm')]
   pub model: Option<String>,

   /// Sampling temperature (0.0-2.0, default: 0.7)
   #[arg(long, short = 't')]
   pub temperature: Option<f32>,

   /// Completion endpoint URL
   #[arg(long)]
   pub api_url: Option<String>,

   /// Print the prompt instead of sending it
   #[arg(long)]
   pub show_prompt: bool,

   /// Copy the suggested message to clipboard
   #[arg(long)]
   pub copy: bool,

   /// Increase log verbosity (-v info, -vv debug)
   #[arg(long, short = 'v', action = clap::ArgAction::Count)]
   pub verbose: u8,
}

impl Default for Args {
   fn default() -> Self {
      Self {
         repo_path:   PathBuf::from("."),
         config:      None,
         model:       None,
         temperature: None,
         api_url:     None,
         show_prompt: false,
         copy:        false,
         verbose:     0,
      }
   }
}
