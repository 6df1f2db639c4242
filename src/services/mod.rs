pub mod phrase;
