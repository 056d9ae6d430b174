//! Role system-prompt assembly.

/// Build the system prompt that keeps the model in character.
///
/// Combines the character's name, their introduction, and the current
/// scene's background into one instruction block.
pub fn role_prompt(name: &str, intro: &str, background: &str) -> String {
    let mut prompt = format!("You are {name}. {intro}");
    if !background.is_empty() {
        prompt.push_str(&format!("\nCurrent scene: {background}"));
    }
    prompt.push_str(&format!(
        "\nStay in character as {name} at all times and answer in their voice. \
         Keep replies vivid but concise."
    ));
    prompt
}
