mod facade_client;
mod helpers;
mod system;
