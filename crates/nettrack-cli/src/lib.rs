//! Client side of nettrack: the HTTP [`client`], the [`api::NetworkApi`]
//! seam, and the data [`hooks`] front ends build on.

pub mod api;
pub mod client;
pub mod hooks;
