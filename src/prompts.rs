pub const IMAGE: &str = include_str!("../data/prompts/image.txt");
pub const SPEECH: &str = include_str!("../data/prompts/speech.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_repeated_var() {
        assert_eq!(render("{{a}} and {{a}}", &[("a", "কলা")]), "কলা and কলা");
    }

    #[test]
    fn test_image_prompt() {
        assert_eq!(render(IMAGE, &[("text", "বই")]), "create image of a \"বই\"");
    }

    #[test]
    fn test_speech_prompt() {
        assert_eq!(
            render(SPEECH, &[("text", "মা")]),
            "তুমি যা লিখেছ তা হলো, \"মা\""
        );
    }

    #[test]
    fn test_prompts_have_text_placeholder() {
        assert!(IMAGE.contains("{{text}}"));
        assert!(SPEECH.contains("{{text}}"));
    }
}
