//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::config::AppConfig;

/// Write the completion script of the `liveterm` command for `shell`.
pub fn write_completion(shell: Shell, out: &mut dyn io::Write) {
    let mut cmd = AppConfig::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completion(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_completes_demo_flags() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("--step-delay"));
        assert!(bash.contains("--single"));
        assert!(bash.contains("--completion"));
    }

    #[test]
    fn fish_names_binary() {
        assert!(script(Shell::Fish).contains("complete -c liveterm"));
    }
}
