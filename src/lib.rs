// Library root
// -----------
// The binary (`main.rs`) parses configuration and hands an `ApiClient`
// to the `Seeder`; everything else lives here so it can be tested
// without a terminal or a live backend.
//
// Module responsibilities:
// - `catalog`: the built-in categories and menu items, and the JSON
//   bodies sent for them.
// - `api`: blocking HTTP calls against the menu backend, behind the
//   `MenuBackend` trait.
// - `images`: finding local images and guessing their content type.
// - `seeder`: the seeding flow and its per-record status reporting.
// - `ui`: terminal output, the confirmation prompt and the spinner.
// - `config`: command-line flags and environment variables.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod seeder;
pub mod ui;
