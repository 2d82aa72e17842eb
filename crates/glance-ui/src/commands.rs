use std::path::PathBuf;

use glance_types::{AppEvent, ImageSourceChoice};

pub const HELP: &str = "\
Commands:
  camera | c            take a photo
  gallery | g [PATH]    pick an image (opens the file chooser without PATH)
  recognize | r         recognize text and ask the remote service
  help | ?              show this help
  quit | q              exit";

/// What one typed line asks for
#[derive(Debug, PartialEq)]
pub enum Command {
    Send(AppEvent),
    Help,
    Nothing,
    Unknown(String),
}

pub fn parse_line(line: &str, awaiting_permission: bool) -> Command {
    let line = line.trim();

    if awaiting_permission {
        let granted = matches!(line.to_ascii_lowercase().as_str(), "y" | "yes");
        return Command::Send(AppEvent::PermissionAnswer { granted });
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "camera" | "c" => Command::Send(AppEvent::SelectImageSource(ImageSourceChoice::Camera)),
        "gallery" | "g" => {
            let path = (!rest.is_empty()).then(|| PathBuf::from(rest));
            Command::Send(AppEvent::SelectImageSource(ImageSourceChoice::Gallery(path)))
        }
        "recognize" | "recognise" | "r" => Command::Send(AppEvent::RecognizeAndQuery),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Send(AppEvent::Quit),
        _ => Command::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_commands() {
        assert_eq!(
            parse_line("camera", false),
            Command::Send(AppEvent::SelectImageSource(ImageSourceChoice::Camera))
        );
        assert_eq!(
            parse_line("g", false),
            Command::Send(AppEvent::SelectImageSource(ImageSourceChoice::Gallery(None)))
        );
        assert_eq!(
            parse_line("gallery  /tmp/my photo.png ", false),
            Command::Send(AppEvent::SelectImageSource(ImageSourceChoice::Gallery(Some(
                PathBuf::from("/tmp/my photo.png")
            ))))
        );
    }

    #[test]
    fn parses_pipeline_and_control_commands() {
        assert_eq!(parse_line("R", false), Command::Send(AppEvent::RecognizeAndQuery));
        assert_eq!(parse_line("quit", false), Command::Send(AppEvent::Quit));
        assert_eq!(parse_line("?", false), Command::Help);
        assert_eq!(parse_line("   ", false), Command::Nothing);
        assert_eq!(parse_line("dance", false), Command::Unknown("dance".to_string()));
    }

    #[test]
    fn pending_prompt_takes_the_answer() {
        assert_eq!(
            parse_line("Y", true),
            Command::Send(AppEvent::PermissionAnswer { granted: true })
        );
        assert_eq!(
            parse_line("camera", true),
            Command::Send(AppEvent::PermissionAnswer { granted: false })
        );
        assert_eq!(
            parse_line("", true),
            Command::Send(AppEvent::PermissionAnswer { granted: false })
        );
    }
}
