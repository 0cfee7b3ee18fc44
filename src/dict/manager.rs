use crate::checker::dictionary::Dictionary;
use crate::config::Config;
use crate::error::DictionaryLoadError;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// A `.dic`/`.aff` pair found in a search directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub name: String,
    pub wordlist: PathBuf,
    pub affix: PathBuf,
}

/// Find the first directory holding both files of a built-in dictionary
pub fn locate_builtin(name: &str, search_dirs: &[PathBuf]) -> Result<DictionaryInfo, DictionaryLoadError> {
    search_dirs
        .iter()
        .map(|dir| DictionaryInfo {
            name: name.to_string(),
            wordlist: dir.join(format!("{}.dic", name)),
            affix: dir.join(format!("{}.aff", name)),
        })
        .find(|info| info.wordlist.is_file() && info.affix.is_file())
        .ok_or_else(|| DictionaryLoadError::NotFound(name.to_string()))
}

pub fn load_builtin(name: &str, search_dirs: &[PathBuf]) -> Result<Dictionary, DictionaryLoadError> {
    let info = locate_builtin(name, search_dirs)?;
    log::debug!("loading dictionary {} from {}", name, info.wordlist.display());
    Dictionary::load(name, &info.wordlist, Some(&info.affix))
}

/// Every complete pair across the search directories; earlier directories shadow later ones
pub fn discover(search_dirs: &[PathBuf]) -> Vec<DictionaryInfo> {
    let mut found: Vec<DictionaryInfo> = Vec::new();

    for dir in search_dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("dic"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();

        for name in names {
            if found.iter().any(|info| info.name == name) {
                continue;
            }
            let affix = dir.join(format!("{}.aff", name));
            if affix.is_file() {
                found.push(DictionaryInfo {
                    wordlist: dir.join(format!("{}.dic", name)),
                    affix,
                    name,
                });
            }
        }
    }

    found
}

pub fn list_dictionaries(config: &Config) -> Result<()> {
    let search_dirs = config.dictionary_search_dirs();
    let found = discover(&search_dirs);

    if found.is_empty() {
        println!("{}", "No dictionaries found.".yellow());
    } else {
        println!("{}", "Available dictionaries:".bold());
        println!();
        for info in &found {
            let size_kb = fs::metadata(&info.wordlist).map(|m| m.len() / 1024).unwrap_or(0);
            println!(
                "  {} {} ({})",
                "✓".green(),
                info.name.cyan().bold(),
                format!("{}KB", size_kb).dimmed()
            );
        }
    }

    println!();
    println!("Searched:");
    for dir in &search_dirs {
        println!("  {}", dir.display().to_string().dimmed());
    }

    Ok(())
}

pub fn show_info(config: &Config, name: &str) -> Result<()> {
    let search_dirs = config.dictionary_search_dirs();
    let info = locate_builtin(name, &search_dirs)?;
    let dictionary = Dictionary::load(name, &info.wordlist, Some(&info.affix))
        .with_context(|| format!("Failed to load dictionary '{}'", name))?;

    print_info(&info, &dictionary);
    Ok(())
}

fn print_info(info: &DictionaryInfo, dictionary: &Dictionary) {
    let rules = dictionary.rules();
    println!("{}", format!("Dictionary: {}", info.name).bold());
    println!("  Wordlist: {}", display(&info.wordlist));
    println!("  Affixes: {}", display(&info.affix));
    println!("  Stems: {}", dictionary.stem_count().to_string().yellow());
    println!("  Forms: {}", dictionary.form_count().to_string().yellow());
    println!("  Prefix rules: {}", rules.prefix_count());
    println!("  Suffix rules: {}", rules.suffix_count());
    println!("  Replacements: {}", rules.replacements.len());
}

fn display(path: &Path) -> ColoredString {
    path.display().to_string().dimmed()
}
