/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `history`: list, show, delete and prune saved chat sessions
*/

pub mod history;
