use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use uuid::Uuid;

use crate::types::Language;

const JAVASCRIPT_STARTER: &str = r#"// Welcome to the Online Code Editor!
console.log("Hello, World!");

function fibonacci(n) {
  if (n <= 1) return n;
  return fibonacci(n - 1) + fibonacci(n - 2);
}

console.log("Fibonacci sequence:");
for (let i = 0; i < 8; i++) {
  console.log(`F(${i}) = ${fibonacci(i)}`);
}"#;

const PYTHON_STARTER: &str = r#"# Welcome to the Online Code Editor!
print("Hello, World!")

def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

print("Fibonacci sequence:")
for i in range(8):
    print(f"F({i}) = {fibonacci(i)}")"#;

const CPP_STARTER: &str = r#"// Welcome to the Online Code Editor!
#include <iostream>
using namespace std;

int fibonacci(int n) {
    if (n <= 1) return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

int main() {
    cout << "Hello, World!" << endl;

    cout << "Fibonacci sequence:" << endl;
    for (int i = 0; i < 8; i++) {
        cout << "F(" << i << ") = " << fibonacci(i) << endl;
    }

    return 0;
}"#;

const HTML_STARTER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Hello World</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
        }
        .container {
            text-align: center;
            padding: 2rem;
            border-radius: 10px;
            background: rgba(255, 255, 255, 0.1);
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Welcome to the Online Code Editor!</h1>
        <p>Start coding and see your results instantly.</p>
    </div>
</body>
</html>"#;

const CSS_STARTER: &str = r#"/* Welcome to the Online Code Editor! */
body {
  font-family: 'Arial', sans-serif;
  margin: 0;
  min-height: 100vh;
  display: flex;
  justify-content: center;
  align-items: center;
}

.welcome-card {
  background: rgba(255, 255, 255, 0.95);
  border-radius: 15px;
  padding: 2rem;
  text-align: center;
  animation: fadeInUp 0.6s ease-out;
}

@keyframes fadeInUp {
  from {
    opacity: 0;
    transform: translateY(30px);
  }
  to {
    opacity: 1;
    transform: translateY(0);
  }
}"#;

pub fn starter_code(language: Language) -> &'static str {
    match language {
        Language::Javascript => JAVASCRIPT_STARTER,
        Language::Python => PYTHON_STARTER,
        Language::Cpp => CPP_STARTER,
        Language::Html => HTML_STARTER,
        Language::Css => CSS_STARTER,
    }
}

/// Entry in the language picker.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LanguageOption {
    pub value: &'static str,
    pub label: &'static str,
    pub starter: &'static str,
}

pub fn language_options() -> Vec<LanguageOption> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageOption {
            value: language.as_str(),
            label: language.label(),
            starter: starter_code(language),
        })
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub id: String,
    pub title: String,
    pub language: Language,
    pub code: String,
    pub output: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn snippet_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// Saved snippets for one editor session, newest first. Lives only in memory.
#[derive(Debug, Default)]
pub struct SnippetShelf {
    snippets: Vec<CodeSnippet>,
}

impl SnippetShelf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, language: Language, code: &str, output: &str) -> &CodeSnippet {
        let snippet = CodeSnippet {
            id: snippet_id(),
            title: format!("{} snippet", language),
            language,
            code: code.to_string(),
            output: Some(output.to_string()).filter(|output| !output.is_empty()),
            created_at: Utc::now(),
        };
        self.snippets.insert(0, snippet);
        &self.snippets[0]
    }

    pub fn load(&self, id: &str) -> Option<&CodeSnippet> {
        self.snippets.iter().find(|snippet| snippet.id == id)
    }

    pub fn list(&self) -> &[CodeSnippet] {
        &self.snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_starter() {
        let options = language_options();
        assert_eq!(options.len(), Language::ALL.len());
        assert!(options.iter().all(|option| !option.starter.is_empty()));
        assert_eq!(options[2].label, "C++");
    }

    #[test]
    fn test_shelf_keeps_newest_first() {
        let mut shelf = SnippetShelf::new();
        let first = shelf.save(Language::Python, "print(1)", "1").id.clone();
        let second = shelf.save(Language::Css, "a {}", "").id.clone();

        let ids: Vec<&str> = shelf.list().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);

        let loaded = shelf.load(&first).unwrap();
        assert_eq!(loaded.title, "python snippet");
        assert_eq!(loaded.output.as_deref(), Some("1"));
        assert_eq!(shelf.load(&second).unwrap().output, None);
        assert!(shelf.load("missing").is_none());
    }

    #[test]
    fn test_snippet_ids_are_short_tokens() {
        let mut shelf = SnippetShelf::new();
        let id = shelf.save(Language::Html, "<p></p>", "").id.clone();
        assert_eq!(id.len(), 9);
    }

    #[test]
    fn test_snippet_serializes_camel_case() {
        let mut shelf = SnippetShelf::new();
        let snippet = shelf.save(Language::Cpp, "int main() {}", "").clone();
        let json = serde_json::to_value(&snippet).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["language"], "cpp");
    }
}
