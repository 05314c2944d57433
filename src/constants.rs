// Webhook constants
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/ai-chat";
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your message.";
pub const WEBHOOK_URL_ENV: &str = "CHATRELAY_WEBHOOK_URL";

// UI constants
pub const INPUT_PROMPT: &str = "→ ";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const WAITING_STATUS: &str = "Waiting for reply...";
