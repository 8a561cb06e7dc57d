//! Terminal styling utilities for consistent CLI output.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::sync::OnceLock;

use owo_colors::OwoColorize;

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

/// Success: checkmarks, completed actions (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Warning: non-fatal issues (yellow).
pub fn warning(s: &str) -> String {
   if colors_enabled() {
      s.yellow().to_string()
   } else {
      s.to_string()
   }
}

/// Error: failures (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

pub fn dim(s: &str) -> String {
   if colors_enabled() {
      s.dimmed().to_string()
   } else {
      s.to_string()
   }
}

/// Get terminal width, capped at 100 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(100)
}

pub mod icons {
   pub const SUCCESS: &str = "\u{2713}";
   pub const WARNING: &str = "\u{26A0}";
   pub const ERROR: &str = "\u{2717}";
}

pub mod box_chars {
   pub const TOP_LEFT: char = '\u{256D}';
   pub const TOP_RIGHT: char = '\u{256E}';
   pub const BOTTOM_LEFT: char = '\u{2570}';
   pub const BOTTOM_RIGHT: char = '\u{256F}';
   pub const HORIZONTAL: char = '\u{2500}';
   pub const VERTICAL: char = '\u{2502}';
}

/// Wrap text to fit within a given width, preserving words.
fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
   if line.trim().is_empty() {
      return vec![String::new()];
   }

   let mut lines = Vec::new();
   let mut current = String::new();

   for word in line.split_whitespace() {
      if current.is_empty() {
         // Overlong words get a line of their own
         current = word.to_string();
      } else if current.chars().count() + 1 + word.chars().count() <= max_width {
         current.push(' ');
         current.push_str(word);
      } else {
         lines.push(std::mem::take(&mut current));
         current = word.to_string();
      }
   }

   if !current.is_empty() {
      lines.push(current);
   }

   lines
}

/// Render a box-framed message with word wrapping.
pub fn boxed_message(title: &str, content: &str, width: usize) -> String {
   use box_chars::*;

   let mut out = String::new();
   let inner_width = width.saturating_sub(4); // "│ " and " │"
   let border_width = width.saturating_sub(2);

   let padding = border_width.saturating_sub(title.chars().count() + 2);
   let left_pad = padding / 2;
   let right_pad = padding - left_pad;

   out.push(TOP_LEFT);
   out.push_str(&HORIZONTAL.to_string().repeat(left_pad));
   out.push(' ');
   out.push_str(&bold(title));
   out.push(' ');
   out.push_str(&HORIZONTAL.to_string().repeat(right_pad));
   out.push(TOP_RIGHT);
   out.push('\n');

   for line in content.lines() {
      for wrapped in wrap_line(line, inner_width) {
         let pad = inner_width.saturating_sub(wrapped.chars().count());
         out.push(VERTICAL);
         out.push(' ');
         out.push_str(&wrapped);
         out.push_str(&" ".repeat(pad));
         out.push(' ');
         out.push(VERTICAL);
         out.push('\n');
      }
   }

   out.push(BOTTOM_LEFT);
   out.push_str(&HORIZONTAL.to_string().repeat(border_width));
   out.push(BOTTOM_RIGHT);

   out
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_wrap_line_respects_width() {
      let wrapped = wrap_line("one two three four", 9);
      assert_eq!(wrapped, vec!["one two", "three", "four"]);
   }

   #[test]
   fn test_wrap_line_long_word() {
      assert_eq!(wrap_line("abcdefghijkl", 5), vec!["abcdefghijkl"]);
   }

   #[test]
   fn test_wrap_line_blank() {
      assert_eq!(wrap_line("", 10), vec![String::new()]);
   }

   #[test]
   fn test_boxed_message_frames_every_line() {
      let out = boxed_message("Title", "Add retry\n\nBody text", 30);
      let lines: Vec<&str> = out.lines().collect();
      assert_eq!(lines.len(), 5);
      assert!(lines[0].starts_with(box_chars::TOP_LEFT));
      assert!(lines[0].contains("Title"));
      assert!(lines[1].contains("Add retry"));
      assert!(lines[4].starts_with(box_chars::BOTTOM_LEFT));
      for line in &lines[1..4] {
         assert!(line.starts_with(box_chars::VERTICAL));
         assert!(line.ends_with(box_chars::VERTICAL));
         assert_eq!(line.chars().count(), 30);
      }
   }
}
