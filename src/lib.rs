#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use om_mapper as mapper;
pub use om_reflect as reflect;
pub use om_utils as utils;
