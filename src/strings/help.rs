//! # Help Text
//!
//! Displayed to the user via the `!help` command.

pub fn main(prefix: &str) -> String {
    format!(
        concat!(
            "**🤖 ellesee Help**\n",
            "Use: {p}command _args_\n",
            "\n",
            "* {p}hello: Say hello\n",
            "* {p}quote: Post a random quote\n",
            "* {p}thinking: Think very hard\n",
            "* {p}votekick @user: Start or vote in a votekick\n",
            "* {p}help: Show this message\n",
        ),
        p = prefix
    )
}
