//! Chat command registration and text dispatch.

use crate::domain::entities::CommandDefinition;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Name of the parent command every content command hangs under.
pub const PARENT_COMMAND: &str = "content";
/// Description of the parent command.
pub const PARENT_DESCRIPTION: &str = "随机内容";

const COMMAND_PREFIX: char = '/';

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Bare parent command: list the sub-commands.
    Help,
    /// Run a configured sub-command.
    Run(&'a CommandDefinition),
}

/// Registered sub-commands, in configuration order.
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Registers one sub-command per definition. Later duplicates are ignored.
    #[must_use]
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = Vec::with_capacity(definitions.len());
        let mut by_name = HashMap::new();

        for definition in definitions {
            if by_name.contains_key(&definition.name) {
                continue;
            }
            by_name.insert(definition.name.clone(), commands.len());
            commands.push(definition);
        }

        Self { commands, by_name }
    }

    /// Registered sub-commands, in configuration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    /// Looks up a sub-command by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.by_name.get(name).map(|&index| &self.commands[index])
    }

    /// Parses `<name>`, `content <name>` or `content.<name>`, optionally
    /// prefixed with `/`.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<Invocation<'_>> {
        let line = line.trim();
        let line = line.strip_prefix(COMMAND_PREFIX).unwrap_or(line);
        let mut words = line.split_whitespace();
        let first = words.next()?;

        if first == PARENT_COMMAND {
            return match words.next() {
                Some(name) => self.get(name).map(Invocation::Run),
                None => Some(Invocation::Help),
            };
        }

        let name = first
            .strip_prefix(PARENT_COMMAND)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(first);
        self.get(name).map(Invocation::Run)
    }

    /// Lists the parent command and its sub-commands.
    #[must_use]
    pub fn help(&self) -> String {
        let mut out = format!("{PARENT_COMMAND} - {PARENT_DESCRIPTION}");
        for command in &self.commands {
            if command.description.is_empty() {
                let _ = write!(out, "\n  {PARENT_COMMAND}.{}", command.name);
            } else {
                let _ = write!(
                    out,
                    "\n  {PARENT_COMMAND}.{} - {}",
                    command.name, command.description
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ContentKind;
    use crate::infrastructure::config::{AppConfig, default_commands};
    use test_case::test_case;

    fn registry() -> CommandRegistry {
        CommandRegistry::new(default_commands())
    }

    #[test_case("hitokoto" ; "bare name")]
    #[test_case("/hitokoto" ; "prefixed name")]
    #[test_case("content hitokoto" ; "parent and name")]
    #[test_case("/content hitokoto" ; "prefixed parent and name")]
    #[test_case("content.hitokoto" ; "dotted")]
    #[test_case("  content.hitokoto  " ; "surrounding whitespace")]
    fn test_parse_runs_command(line: &str) {
        let registry = registry();
        match registry.parse(line) {
            Some(Invocation::Run(definition)) => assert_eq!(definition.name, "hitokoto"),
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test_case("content" ; "bare parent")]
    #[test_case("/content" ; "prefixed parent")]
    fn test_parse_help(line: &str) {
        assert_eq!(registry().parse(line), Some(Invocation::Help));
    }

    #[test_case("" ; "empty")]
    #[test_case("weather" ; "unknown")]
    #[test_case("content weather" ; "unknown under parent")]
    #[test_case("content.weather" ; "unknown dotted")]
    #[test_case("contentpixiv" ; "missing separator")]
    fn test_parse_rejects(line: &str) {
        assert_eq!(registry().parse(line), None);
    }

    #[test]
    fn test_preserves_order_and_skips_duplicates() {
        let registry = CommandRegistry::new(vec![
            CommandDefinition::new("b", "", ContentKind::Text, "b.json"),
            CommandDefinition::new("a", "", ContentKind::Text, "a.json"),
            CommandDefinition::new("b", "", ContentKind::Text, "other.json"),
        ]);

        let names: Vec<_> = registry.commands().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(registry.get("b").unwrap().source, "b.json");
    }

    #[test]
    fn test_validated_names_are_reachable() {
        let mut config = AppConfig::default();
        config
            .commands
            .push(CommandDefinition::new("cats", "", ContentKind::Image, "/srv/cats"));
        config.validate().unwrap();

        let registry = CommandRegistry::new(config.commands);
        for command in registry.commands() {
            for line in [
                command.name.clone(),
                format!("content {}", command.name),
                format!("/content.{}", command.name),
            ] {
                assert_eq!(registry.parse(&line), Some(Invocation::Run(command)));
            }
        }
    }

    #[test]
    fn test_padded_name_fails_validation() {
        let mut config = AppConfig::default();
        config.commands = vec![CommandDefinition::new(" djt ", "", ContentKind::P6oy, "chicken")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let registry = CommandRegistry::new(vec![
            CommandDefinition::new("djt", "随机毒鸡汤", ContentKind::P6oy, "chicken"),
            CommandDefinition::new("lines", "", ContentKind::Text, "l.json"),
        ]);

        assert_eq!(
            registry.help(),
            "content - 随机内容\n  content.djt - 随机毒鸡汤\n  content.lines"
        );
    }
}
