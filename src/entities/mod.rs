//! Entity module - Contains all SeaORM entity definitions for the database.
//! The only table is the access-flag cache consulted by the access gate.

pub mod access_flag;

pub use access_flag::{Column as AccessFlagColumn, Entity as AccessFlag, Model as AccessFlagModel};
