//! End-to-end tests driving the library through its JSON command boundary

#[cfg(test)]
mod commands;
#[cfg(test)]
mod library_flow;
