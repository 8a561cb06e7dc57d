use anyhow::Context;
use arboard::Clipboard;
use clap::Parser;
use git_suggest::{
   api::{RemoteBackend, ThreadSleeper},
   config::SuggestConfig,
   error::{Result, SuggestError},
   prompt::build_prompt,
   style,
   suggest::{Collected, Outcome, collect_changes, suggest_commit_message},
   types::Args,
};
use tracing_subscriber::EnvFilter;

/// Log to stderr; `RUST_LOG` wins over the `-v` count
fn init_tracing(verbose: u8) {
   let level = match verbose {
      0 => "warn",
      1 => "info",
      _ => "debug",
   };
   let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

   tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .with_target(false)
      .without_time()
      .init();
}

/// Apply CLI overrides to config
fn apply_cli_overrides(config: &mut SuggestConfig, args: &Args) {
   if let Some(ref model) = args.model {
      config.model.clone_from(model);
   }
   if let Some(ref api_url) = args.api_url {
      config.api_url.clone_from(api_url);
   }
   if let Some(temp) = args.temperature {
      if (0.0..=2.0).contains(&temp) {
         config.temperature = temp;
      } else {
         eprintln!(
            "{} Temperature {} out of range [0.0, 2.0], using {}",
            style::warning(style::icons::WARNING),
            temp,
            config.temperature
         );
      }
   }
}

/// Load config from args or default
fn load_config_from_args(args: &Args) -> Result<SuggestConfig> {
   if let Some(ref config_path) = args.config {
      SuggestConfig::from_file(config_path)
   } else {
      SuggestConfig::load()
   }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
   let mut clipboard = Clipboard::new().map_err(SuggestError::Clipboard)?;
   clipboard.set_text(text).map_err(SuggestError::Clipboard)?;
   Ok(())
}

/// Print the prompt that would be sent, without calling the endpoint
fn show_prompt(args: &Args) -> Result<()> {
   match collect_changes(&args.repo_path)? {
      Collected::Finished(outcome) => report(outcome, args),
      Collected::Diffs(diffs) => println!("{}", build_prompt(&diffs)),
   }
   Ok(())
}

fn report(outcome: Outcome, args: &Args) {
   match outcome {
      Outcome::NotARepository => {
         println!("{}", style::error("Error: The specified path is not a valid git repository."));
      },
      Outcome::NoChanges => println!("No changes detected in the repository."),
      Outcome::NothingGenerated => {
         println!("{}", style::warning("No commit message generated."));
      },
      Outcome::Generated(message) => {
         if style::colors_enabled() {
            let width = style::term_width();
            println!("{}", style::boxed_message("Suggested commit message", &message, width));
         } else {
            println!("Suggested commit message: ");
            println!("{message}");
         }

         if args.copy {
            match copy_to_clipboard(&message) {
               Ok(()) => {
                  println!("\n{} Copied to clipboard", style::success(style::icons::SUCCESS));
               },
               Err(e) => {
                  println!("\n{}", style::dim(&format!("Note: Failed to copy to clipboard: {e}")));
               },
            }
         }
      },
   }
}

fn run(args: &Args) -> anyhow::Result<()> {
   let mut config = load_config_from_args(args).context("Failed to load configuration")?;
   apply_cli_overrides(&mut config, args);

   if args.show_prompt {
      return show_prompt(args).context("Failed to collect changes");
   }

   let backend = RemoteBackend::new(&config).context("Failed to build HTTP client")?;
   let outcome =
      suggest_commit_message(&args.repo_path, &backend, &config.retry_policy(), &ThreadSleeper)?;
   report(outcome, args);
   Ok(())
}

fn main() {
   dotenvy::dotenv().ok();
   let args = Args::parse();
   init_tracing(args.verbose);

   // Every failure is reported, never propagated as a non-zero exit
   if let Err(e) = run(&args) {
      println!(
         "{} An error occurred while generating the commit message: {e:#}",
         style::error(style::icons::ERROR)
      );
      println!("Please try again later or write the commit message manually.");
   }
}
