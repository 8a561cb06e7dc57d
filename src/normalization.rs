//! Normalization of raw completion text into a commit message

use serde_json::Value;

/// Key the prompt asks the model to wrap its answer in
const MESSAGE_KEY: &str = "commitMessage";

/// Pull the commit message out of a completion.
///
/// Models asked for `{"commitMessage": "..."}` often wrap it in a fenced block
/// or surround it with chatter. The first JSON object carrying a string
/// `commitMessage` wins; otherwise the trimmed text is returned as is.
pub fn extract_commit_message(completion: &str) -> String {
   let trimmed = completion.trim();

   for (start, _) in trimmed.match_indices('{') {
      let mut stream = serde_json::Deserializer::from_str(&trimmed[start..]).into_iter::<Value>();
      if let Some(Ok(Value::Object(map))) = stream.next()
         && let Some(Value::String(message)) = map.get(MESSAGE_KEY)
      {
         return message.trim().to_string();
      }
   }

   trimmed.to_string()
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_extract_plain_text_unchanged() {
      assert_eq!(extract_commit_message("  Fix off-by-one in pager\n"), "Fix off-by-one in pager");
   }

   #[test]
   fn test_extract_bare_json() {
      let raw = r#"{"commitMessage": "Add retry with backoff"}"#;
      assert_eq!(extract_commit_message(raw), "Add retry with backoff");
   }

   #[test]
   fn test_extract_fenced_json() {
      let raw = "Here you go:\n```json\n{\n    \"commitMessage\": \"Drop context lines from \
                 prompt\"\n}\n```\nLet me know!";
      assert_eq!(extract_commit_message(raw), "Drop context lines from prompt");
   }

   #[test]
   fn test_extract_braces_inside_message() {
      let raw = r#"{"commitMessage": "Escape { and } in templates"}"#;
      assert_eq!(extract_commit_message(raw), "Escape { and } in templates");
   }

   #[test]
   fn test_extract_multiline_message() {
      let raw = r#"{"commitMessage": "Validate repo path\n\nReject paths outside a work tree."}"#;
      assert_eq!(
         extract_commit_message(raw),
         "Validate repo path\n\nReject paths outside a work tree."
      );
   }

   #[test]
   fn test_extract_object_without_key_falls_back() {
      let raw = r#"{"message": "wrong key"}"#;
      assert_eq!(extract_commit_message(raw), raw);
   }

   #[test]
   fn test_extract_truncated_json_falls_back() {
      let raw = r#"{"commitMessage": "Add feat"#;
      assert_eq!(extract_commit_message(raw), raw);
   }

   #[test]
   fn test_extract_empty() {
      assert_eq!(extract_commit_message("   "), "");
   }
}
