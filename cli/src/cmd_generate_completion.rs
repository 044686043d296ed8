// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs::File, io, path::Path, path::PathBuf};

use clap::{ArgMatches, Command, ValueEnum, ValueHint, arg, value_parser};
use clap_complete::{Shell as ClapShell, generate};
use clap_complete_nushell::Nushell;
use evdesk_core::APP_NAME;

use crate::Cli;

/// Prints or writes a completion script for the evdesk command line.
#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    /// Target shell, detected from `$SHELL` when not given.
    pub shell: Option<Shell>,

    /// File to write to instead of stdout.
    pub output: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate shell completion for evdesk")
            .hide(true)
            .arg(
                arg!(shell: [SHELL] "The shell to complete for, defaults to the one in $SHELL")
                    .value_parser(value_parser!(Shell)),
            )
            .arg(
                arg!(-o --output <FILE> "Write the script to a file")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: matches.get_one::<Shell>("shell").copied(),
            output: matches.get_one::<PathBuf>("output").cloned(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        let shell = match self.shell {
            Some(shell) => shell,
            None => std::env::var("SHELL")
                .ok()
                .and_then(|path| Shell::from_path(Path::new(&path)))
                .ok_or("Cannot detect the shell from $SHELL, please name one")?,
        };

        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
                shell.generate(&mut file);
                tracing::info!(path = %path.display(), ?shell, "completion written");
            }
            None => shell.generate(&mut io::stdout()),
        }
        Ok(())
    }
}

/// Shells evdesk ships completions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[value(name = "powershell")]
    PowerShell,
    Zsh,
}

impl Shell {
    /// Guesses the shell from an executable path such as `/usr/bin/zsh`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.file_stem()?.to_str()? {
            "bash" => Some(Self::Bash),
            "elvish" => Some(Self::Elvish),
            "fish" => Some(Self::Fish),
            "nu" | "nushell" => Some(Self::Nushell),
            "pwsh" | "powershell" => Some(Self::PowerShell),
            "zsh" => Some(Self::Zsh),
            _ => None,
        }
    }

    /// Writes the completion script of the evdesk command line.
    pub fn generate(self, buf: &mut impl io::Write) {
        let mut cmd = Cli::command();
        let clap_shell = match self {
            Shell::Nushell => return generate(Nushell, &mut cmd, APP_NAME, buf),
            Shell::Bash => ClapShell::Bash,
            Shell::Elvish => ClapShell::Elvish,
            Shell::Fish => ClapShell::Fish,
            Shell::PowerShell => ClapShell::PowerShell,
            Shell::Zsh => ClapShell::Zsh,
        };
        generate(clap_shell, &mut cmd, APP_NAME, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CmdGenerateCompletion {
        let matches = Cli::command()
            .try_get_matches_from(["evdesk", "generate-completion"].iter().chain(args))
            .unwrap();
        CmdGenerateCompletion::from(matches.subcommand_matches("generate-completion").unwrap())
    }

    #[test]
    fn test_parse_generate_completion() {
        let parsed = parse(&["bash", "-o", "/tmp/evdesk.bash"]);
        assert_eq!(parsed.shell, Some(Shell::Bash));
        assert_eq!(parsed.output, Some(PathBuf::from("/tmp/evdesk.bash")));

        let parsed = parse(&[]);
        assert_eq!(parsed.shell, None);
        assert_eq!(parsed.output, None);
    }

    #[test]
    fn test_parse_shell_names() {
        for (name, shell) in [
            ("bash", Shell::Bash),
            ("elvish", Shell::Elvish),
            ("fish", Shell::Fish),
            ("nushell", Shell::Nushell),
            ("powershell", Shell::PowerShell),
            ("zsh", Shell::Zsh),
        ] {
            assert_eq!(parse(&[name]).shell, Some(shell), "{name}");
        }
    }

    #[test]
    fn test_shell_from_path() {
        assert_eq!(Shell::from_path(Path::new("/usr/bin/zsh")), Some(Shell::Zsh));
        assert_eq!(Shell::from_path(Path::new("/opt/homebrew/bin/nu")), Some(Shell::Nushell));
        assert_eq!(Shell::from_path(Path::new("pwsh.exe")), Some(Shell::PowerShell));
        assert_eq!(Shell::from_path(Path::new("/bin/sh")), None);
        assert_eq!(Shell::from_path(Path::new("")), None);
    }

    #[test]
    fn test_generate_lists_evdesk_subcommands() {
        let mut output = vec![];
        Shell::Fish.generate(&mut output);
        let script = String::from_utf8(output).unwrap();
        assert!(script.contains("evdesk"));
        assert!(script.contains("search"));
        assert!(script.contains("delete"));
    }

    #[test]
    fn test_run_writes_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_evdesk");
        let cmd = CmdGenerateCompletion {
            shell: Some(Shell::Zsh),
            output: Some(path.clone()),
        };

        cmd.run().unwrap();

        let script = std::fs::read_to_string(path).unwrap();
        assert!(script.contains("#compdef evdesk"));
    }
}
