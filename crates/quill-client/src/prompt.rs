//! Prompt template for the generation backend.

use crate::request::GenerationRequest;

/// Build the generation prompt for a validated request.
///
/// The keyword instruction line is only present when keywords were given.
#[must_use]
pub fn build_prompt(request: &GenerationRequest) -> String {
    let keyword_instructions = if request.keywords.is_empty() {
        String::new()
    } else {
        format!(
            "Please naturally incorporate the following keywords: {}.\n",
            request.keywords
        )
    };

    format!(
        "You are an expert content creator. Your task is to generate high-quality written \
         content based on the following instructions.\n\
         \n\
         Topic: \"{topic}\"\n\
         Tone of Voice: {tone}\n\
         {keyword_instructions}\
         The generated content should be approximately {length} words long.\n\
         \n\
         Please generate a well-structured, engaging, and informative piece of content. \
         Ensure the tone is consistent throughout. Do not include a title or any preamble \
         like \"Here is the content you requested\". Just provide the main body of the \
         content.",
        topic = request.topic,
        tone = request.tone,
        length = request.content_length,
    )
}
