//! # Commands
//!
//! The functions page components call. Each takes exactly the handles it
//! needs: reads take a [`CartReader`](crate::CartReader), writes take a
//! [`CartDispatcher`](crate::CartDispatcher).

pub mod cart;
