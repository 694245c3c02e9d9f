// ABOUTME: Subcommand groups of the gwsctl CLI
// ABOUTME: Each group parses its own arguments and executes against a Runtime

pub mod auth;
