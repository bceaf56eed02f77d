//! Persona chatbots on top of the ReAct core and the wallet toolkit:
//! configuration, agent assembly and reply streaming.

pub mod app;
pub mod config;
pub mod error;
pub mod initializer;
pub mod persona;
pub mod streamer;
pub mod temperature;

pub use app::ChatApp;
pub use config::{load_dotenv, report_dotenv, ChatbotConfig};
pub use error::ChatbotError;
pub use initializer::{initialize_agent, Collaborators, LiveCollaborators, MODEL, THREAD_ID};
pub use persona::Persona;
pub use streamer::{accumulate, get_chat_response, stream_response, StreamedReply};
pub use temperature::{TemperatureError, TemperatureSetting};
