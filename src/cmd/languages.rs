//! `coderefine languages`.

use coderefine::api::SUGGESTED_LANGUAGES;
use coderefine::config::RefineConfig;
use console::style;

pub fn cmd_languages(config: &RefineConfig) {
    let default = config.default_language();
    for lang in SUGGESTED_LANGUAGES {
        if default.is_some_and(|d| d.eq_ignore_ascii_case(lang)) {
            println!("{} {}", lang, style("(default)").dim());
        } else {
            println!("{}", lang);
        }
    }
    if let Some(d) = default
        && !SUGGESTED_LANGUAGES
            .iter()
            .any(|l| l.eq_ignore_ascii_case(d))
    {
        println!("{} {}", d, style("(default)").dim());
    }
    println!();
    println!(
        "{}",
        style("Any other language name is passed to the service as-is.").dim()
    );
}
