mod client_repository;
mod contact_repository;

pub use client_repository::ClientRepository;
pub use contact_repository::ContactRepository;
