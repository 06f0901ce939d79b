//! Man page generator for spixfer
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[path = "../cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() -> io::Result<()> {
    let output_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    let mut buffer = Vec::new();
    render(&mut buffer)?;

    let output_path = output_dir.join("spixfer.1");
    fs::write(&output_path, buffer)?;

    println!("Man page generated at: {}", output_path.display());
    println!("\nTo view the man page:");
    println!("  man -l {}", output_path.display());

    Ok(())
}

/// Render the full page
///
/// The plain-text `after_help` examples are replaced by a roff EXAMPLES
/// section built from the same table.
fn render(out: &mut dyn Write) -> io::Result<()> {
    let man = clap_mangen::Man::new(cli::Cli::command());
    man.render_title(out)?;
    man.render_name_section(out)?;
    man.render_synopsis_section(out)?;
    man.render_description_section(out)?;
    man.render_options_section(out)?;
    render_examples_section(out)?;
    render_exit_status_section(out)?;
    render_files_section(out)?;
    man.render_version_section(out)?;
    man.render_authors_section(out)?;
    Ok(())
}

fn render_examples_section(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, ".SH EXAMPLES")?;
    for (command, description) in cli::EXAMPLES {
        writeln!(out, ".TP")?;
        writeln!(out, ".B {}", roff_escape(command))?;
        writeln!(out, "{}", roff_escape(description))?;
    }
    Ok(())
}

fn render_exit_status_section(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, ".SH \"EXIT STATUS\"")?;
    writeln!(out, ".TP\n.B 0\nEvery transfer completed.")?;
    writeln!(
        out,
        ".TP\n.B 1\nThe device could not be opened or configured, a payload was \
         rejected, or a transfer failed."
    )?;
    writeln!(out, ".TP\n.B 2\nInvalid command line.")?;
    Ok(())
}

fn render_files_section(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, ".SH FILES")?;
    writeln!(out, ".TP\n.I /dev/spidevB.C\nspidev device for bus B, chip select C.")?;
    writeln!(
        out,
        ".TP\n.I /sys/module/spidev/parameters/bufsiz\nLargest message the \
         kernel accepts. The page size is assumed when it cannot be read."
    )?;
    Ok(())
}

fn roff_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('-', "\\-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_roff_escape() {
        assert_eq!(roff_escape("--mode 3"), "\\-\\-mode 3");
        assert_eq!(roff_escape("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_page_lists_examples() {
        let page = rendered();
        assert!(page.contains(".SH EXAMPLES"));
        assert!(page.contains(".B spixfer \\-\\-mode 3 /dev/spidev1.0 1M 9F000000"));
        for (_, description) in cli::EXAMPLES {
            assert!(page.contains(description));
        }
        // Examples appear once, as roff, not also as the --help text
        assert!(!page.contains("Examples:"));
    }

    #[test]
    fn test_page_sections() {
        let page = rendered();
        for section in [".SH NAME", ".SH SYNOPSIS", ".SH \"EXIT STATUS\"", ".SH FILES"] {
            assert!(page.contains(section), "missing {}", section);
        }
        assert!(page.contains("/sys/module/spidev/parameters/bufsiz"));
    }
}
