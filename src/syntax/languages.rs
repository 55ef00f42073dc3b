//! Language identification
//!
//! Maps file extensions and Markdown fence hints to canonical language ids
//! and carries the per-language flags the scanners depend on.

use std::path::Path;

pub const PLAIN_TEXT: &str = "plaintext";
pub const MARKDOWN: &str = "markdown";

/// Fence hints and short names mapped to canonical language ids.
/// Many-to-one: several hints may share a target.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("node", "javascript"),
    ("jsx", "javascriptreact"),
    ("ts", "typescript"),
    ("mts", "typescript"),
    ("cts", "typescript"),
    ("tsx", "typescriptreact"),
    ("py", "python"),
    ("py3", "python"),
    ("python3", "python"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("sh", "shellscript"),
    ("bash", "shellscript"),
    ("zsh", "shellscript"),
    ("shell", "shellscript"),
    ("console", "shellscript"),
    ("ps1", "powershell"),
    ("pwsh", "powershell"),
    ("ps", "powershell"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("c++", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("h", "c"),
    ("cs", "csharp"),
    ("c#", "csharp"),
    ("f#", "fsharp"),
    ("fs", "fsharp"),
    ("golang", "go"),
    ("kt", "kotlin"),
    ("kts", "kotlin"),
    ("ex", "elixir"),
    ("exs", "elixir"),
    ("erl", "erlang"),
    ("hs", "haskell"),
    ("pl", "perl"),
    ("pm", "perl"),
    ("htm", "html"),
    ("xhtml", "html"),
    ("svg", "xml"),
    ("sass", "scss"),
    ("docker", "dockerfile"),
    ("make", "makefile"),
    ("mk", "makefile"),
    ("tf", "terraform"),
    ("hcl", "terraform"),
    ("vbnet", "vb"),
    ("cmd", "bat"),
    ("jl", "julia"),
    ("txt", PLAIN_TEXT),
    ("text", PLAIN_TEXT),
    ("plain", PLAIN_TEXT),
];

/// Languages whose first line is commonly a shebang
const FIRST_LINE_SUPPRESSED: &[&str] = &["elixir", "python", "tcl"];

/// Languages following the `/** ... */` documentation convention
const DOC_BLOCK_LANGUAGES: &[&str] = &[
    "apex",
    "javascript",
    "javascriptreact",
    "typescript",
    "typescriptreact",
];

/// Canonical registry key for a language id or fence hint
pub fn canonical_language(hint: &str) -> String {
    let lowered = hint.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lowered)
}

/// Detect language from file extension
pub fn language_from_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "py" | "pyw" => "python",
        "rb" => "ruby",
        "go" => "go",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "cpp",
        "cs" => "csharp",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "php" => "php",
        "sh" | "bash" | "zsh" => "shellscript",
        "ps1" | "psm1" => "powershell",
        "lua" => "lua",
        "sql" => "sql",
        "ex" | "exs" => "elixir",
        "erl" | "hrl" => "erlang",
        "hs" => "haskell",
        "tcl" => "tcl",
        "pl" | "pm" => "perl",
        "r" => "r",
        "jl" => "julia",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "ini" | "cfg" => "ini",
        "html" | "htm" => "html",
        "xml" | "svg" => "xml",
        "css" => "css",
        "scss" | "sass" => "scss",
        "less" => "less",
        "md" | "markdown" => MARKDOWN,
        "apex" | "cls" => "apex",
        "dart" => "dart",
        "scala" => "scala",
        "zig" => "zig",
        "vb" => "vb",
        "bat" | "cmd" => "bat",
        "tf" | "hcl" => "terraform",
        _ => PLAIN_TEXT,
    }
}

/// Detect language from file path
pub fn language_for_path(path: &Path) -> &'static str {
    match path.file_name().and_then(|name| name.to_str()) {
        Some("Dockerfile") => return "dockerfile",
        Some("Makefile" | "makefile" | "GNUmakefile") => return "makefile",
        _ => {}
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(language_from_extension)
        .unwrap_or(PLAIN_TEXT)
}

/// Whether a match at the very first character of the document is ignored
pub fn suppresses_first_line(language: &str) -> bool {
    FIRST_LINE_SUPPRESSED.contains(&language)
}

pub fn uses_doc_blocks(language: &str) -> bool {
    DOC_BLOCK_LANGUAGES.contains(&language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_language() {
        assert_eq!(canonical_language("js"), "javascript");
        assert_eq!(canonical_language("PY"), "python");
        assert_eq!(canonical_language(" rs "), "rust");
        assert_eq!(canonical_language("python"), "python");
        assert_eq!(canonical_language("unknown-lang"), "unknown-lang");
        assert_eq!(canonical_language(""), "");
    }

    #[test]
    fn test_aliases_are_many_to_one() {
        assert_eq!(canonical_language("sh"), canonical_language("bash"));
        assert_eq!(canonical_language("zsh"), "shellscript");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(language_from_extension("rs"), "rust");
        assert_eq!(language_from_extension("PY"), "python");
        assert_eq!(language_from_extension("md"), MARKDOWN);
        assert_eq!(language_from_extension("unknown"), PLAIN_TEXT);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(language_for_path(Path::new("src/main.rs")), "rust");
        assert_eq!(language_for_path(Path::new("/tmp/README.md")), MARKDOWN);
        assert_eq!(language_for_path(Path::new("docker/Dockerfile")), "dockerfile");
        assert_eq!(language_for_path(Path::new("no_extension")), PLAIN_TEXT);
    }

    #[test]
    fn test_language_flags() {
        assert!(suppresses_first_line("python"));
        assert!(!suppresses_first_line("rust"));
        assert!(uses_doc_blocks("typescript"));
        assert!(!uses_doc_blocks("c"));
    }
}
