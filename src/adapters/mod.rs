pub mod messages_api;
