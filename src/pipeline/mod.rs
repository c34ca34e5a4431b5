pub mod assistant; // Message → intent → prompt → reply
pub mod media; // OCR, image description, transcription
