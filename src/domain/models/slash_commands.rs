#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text.split_whitespace().next().unwrap_or_default();
        let cmd = SlashCommand {
            command: prefix.to_string(),
        };
        if cmd.is_quit()
            || cmd.is_training_program()
            || cmd.is_load_more()
            || cmd.is_refresh()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_training_program(&self) -> bool {
        return ["/p", "/program"].contains(&self.command.as_str());
    }

    pub fn is_load_more(&self) -> bool {
        return ["/m", "/more"].contains(&self.command.as_str());
    }

    pub fn is_refresh(&self) -> bool {
        return ["/r", "/refresh"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
