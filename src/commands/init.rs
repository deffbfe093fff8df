use anyhow::Result;
use clap::{Command, ValueEnum};
use clap_complete::{Shell as CompleteShell, generate};
use std::io::Write;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Shell code defining a `gwt` function that `cd`s into whatever path the
/// binary prints.
#[must_use]
pub fn shell_integration(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => BASH_INTEGRATION,
        Shell::Zsh => ZSH_INTEGRATION,
        Shell::Fish => FISH_INTEGRATION,
    }
}

/// Generate native shell completions using clap
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) -> Result<()> {
    let clap_shell = match shell {
        Shell::Bash => CompleteShell::Bash,
        Shell::Zsh => CompleteShell::Zsh,
        Shell::Fish => CompleteShell::Fish,
    };

    let name = cmd.get_name().to_string();
    let mut buffer = Vec::new();
    generate(clap_shell, cmd, name, &mut buffer);
    out.write_all(&buffer)?;
    Ok(())
}

const BASH_INTEGRATION: &str = r#"# gwt shell integration for Bash
# Add to ~/.bashrc:  eval "$(command gwt init bash)"

gwt() {
    case "$1" in
        init|completions|help|-h|--help|-V|--version|--list-branches)
            command gwt "$@"
            ;;
        *)
            local target
            target="$(command gwt "$@")" || return $?
            if [ -n "$target" ]; then
                cd "$target" || return 1
            fi
            ;;
    esac
}

_gwt_complete() {
    local cur="${COMP_WORDS[COMP_CWORD]}"
    if [ "$COMP_CWORD" -eq 1 ]; then
        local branches
        branches="$(command gwt --list-branches 2>/dev/null)"
        COMPREPLY=($(compgen -W "add remove rm main master init completions $branches" -- "$cur"))
    elif [ "$COMP_CWORD" -eq 2 ]; then
        case "${COMP_WORDS[1]}" in
            remove|rm) COMPREPLY=($(compgen -W "--force" -- "$cur")) ;;
            init|completions) COMPREPLY=($(compgen -W "bash zsh fish" -- "$cur")) ;;
        esac
    fi
}
complete -F _gwt_complete gwt
"#;

const ZSH_INTEGRATION: &str = r#"# gwt shell integration for Zsh
# Add to ~/.zshrc:  eval "$(command gwt init zsh)"

gwt() {
    case "$1" in
        init|completions|help|-h|--help|-V|--version|--list-branches)
            command gwt "$@"
            ;;
        *)
            local target
            target="$(command gwt "$@")" || return $?
            if [[ -n "$target" ]]; then
                cd "$target" || return 1
            fi
            ;;
    esac
}

_gwt() {
    if (( CURRENT == 2 )); then
        local -a entries
        entries=(add remove rm main master init completions ${(f)"$(command gwt --list-branches 2>/dev/null)"})
        compadd -a entries
    elif [[ "${words[2]}" == (remove|rm) ]]; then
        compadd -- --force
    elif [[ "${words[2]}" == (init|completions) ]]; then
        compadd bash zsh fish
    fi
}

# Register the completion (only if compinit has been called)
if (( $+functions[compdef] )); then
    compdef _gwt gwt
fi
"#;

const FISH_INTEGRATION: &str = r#"# gwt shell integration for Fish
# Add to ~/.config/fish/config.fish:  command gwt init fish | source

function gwt
    switch "$argv[1]"
        case init completions help -h --help -V --version --list-branches
            command gwt $argv
        case '*'
            set -l target (command gwt $argv)
            or return $status
            if test -n "$target"
                cd "$target"
            end
    end
end

complete -c gwt -f -n '__fish_use_subcommand' -a 'add remove main master init completions'
complete -c gwt -f -n '__fish_use_subcommand' -a '(command gwt --list-branches 2>/dev/null)' -d 'Worktree branch'
complete -c gwt -f -n '__fish_seen_subcommand_from remove rm' -s f -l force -d 'Force removal'
complete -c gwt -f -n '__fish_seen_subcommand_from init completions' -a 'bash zsh fish'
"#;
