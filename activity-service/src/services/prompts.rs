//! Prompt templates.
//!
//! Caller input is embedded verbatim: no escaping, truncation or
//! injection filtering.

use crate::models::{ActivitySuggestion, ImageMatch};

const SUGGESTION_INSTRUCTIONS: &str = "\
You are an activity recommendation assistant. Suggest 3-5 fun activities based on user preferences.

IMPORTANT: Return ONLY a valid JSON array of objects. No additional text, explanations, or formatting.
Each object should have \"activity\" and \"location\" fields.

Format: [{\"activity\": \"activity name\", \"location\": \"specific location\"}, {\"activity\": \"activity name\", \"location\": \"specific location\"}]";

const IMAGE_MATCH_INSTRUCTIONS: &str = "\
For each activity in the list of activities, choose an image that matches it the best from the list of images provided.
Do not make up any of your own images or urls, just choose the ones from the list of images that are provided.
IMPORTANT: Return ONLY a valid JSON array of objects. No additional text, explanations, or formatting.
Each object should have \"activity\" and \"image\" fields where image is ONLY the filename.

Format: [{\"activity\": \"activity name\", \"image\": \"filename.png\"}, {\"activity\": \"activity name\", \"image\": \"filename.png\"}]";

const BANNER_INSTRUCTIONS: &str = "\
Create a high-quality, aesthetic, cute horizontal banner illustration for a student activity planning web app.

Main focus:
- Show a small group of diverse college-age students actively engaged in: {activity}.
- The scene should clearly represent the activity while staying friendly, positive, and inviting.
- Characters should look modern, expressive, and relatable.

Composition:
- CRITICAL: Wide horizontal banner in 16:9 aspect ratio (1920x1080 or similar).
- Fill the ENTIRE width of the image edge-to-edge with the scene - NO white borders or empty margins.
- The scene should extend to all four edges of the canvas.
- Keep main characters slightly off-center with intentional compositional space to allow overlaid UI text.
- Background should imply the correct environment (outdoor field, living room, study area, etc.) but remain simple, uncluttered, and secondary to the characters.
- Medium-distance perspective so faces and body language are readable.
- Use a full, immersive background that fills the entire frame.

Art Direction:
- Clean, modern illustration suitable for a web interface.
- Soft, cohesive color palette with smooth lighting.
- Avoid extreme stylization, keep it balanced (not overly cartoonish, not hyper-realistic).
- No text, no logos, no watermarks, no UI elements.
- NO white space, NO borders, NO padding - the illustration must bleed to the edges.

Details:
- Lighting should match the activity (daylight for outdoors, soft warm lighting for indoors).
- Include subtle props or context elements that reinforce the activity without crowding the frame.
- Characters should include gender and ethnic diversity and wear activity-appropriate casual clothing.
- Ensure the background environment extends fully to all edges of the image.

Output:
- Generate one edge-to-edge horizontal banner illustration in 16:9 aspect ratio optimized for use as a card header image.";

fn suggestion_example() -> String {
    let example = [
        ActivitySuggestion::new("Kayaking", "Lake Michigan"),
        ActivitySuggestion::new("Bike Riding", "Lakefront Trail"),
        ActivitySuggestion::new("Zoo Visit", "Lincoln Park Zoo"),
    ];
    serde_json::to_string(&example).unwrap_or_default()
}

fn image_match_example() -> String {
    let example = [
        ImageMatch::new("Kayaking", "kayaking.png"),
        ImageMatch::new("Bike Riding", "bikeRiding.png"),
        ImageMatch::new("Zoo Visit", "zoo.png"),
    ];
    serde_json::to_string(&example).unwrap_or_default()
}

/// Prompt asking for activity suggestions near `location`.
pub fn activity_suggestions_prompt(user_prompt: &str, location: &str) -> String {
    format!(
        "{}\n\nExample: {}\n\nUser Request: {} with {}",
        SUGGESTION_INSTRUCTIONS,
        suggestion_example(),
        user_prompt,
        location
    )
}

/// Prompt asking the model to pair each activity with one of `filenames`.
pub fn image_match_prompt(activities: &str, filenames: &[String]) -> String {
    let files = serde_json::to_string(filenames).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{}\n\nExample: {}\n\nUser list of activities: {}\n\nAvailable image files: {}",
        IMAGE_MATCH_INSTRUCTIONS,
        image_match_example(),
        activities,
        files
    )
}

/// Prompt for a single banner illustration of `activity`.
pub fn banner_image_prompt(activity: &str) -> String {
    BANNER_INSTRUCTIONS.replace("{activity}", activity)
}
