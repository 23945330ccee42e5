use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    ipa-analyze completions bash > ~/.bash_completion.d/ipa-analyze\n\n\
                  Generate zsh completions:\n    ipa-analyze completions zsh > ~/.zfunc/_ipa-analyze\n\n\
                  Generate fish completions:\n    ipa-analyze completions fish > ~/.config/fish/completions/ipa-analyze.fish\n\n\
                  Generate PowerShell completions:\n    ipa-analyze completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
