use std::fs::File;
use std::io::prelude::*;

use serde_derive::Serialize;

#[derive(Debug, Serialize)]
pub struct Product {
    name: String,
    manufacturer: String,
    price: i32,
    summary: String,
}

impl Product {
    #[allow(dead_code)]
    pub fn new() -> Product {
        Product {
            name: "Moto G".to_owned(),
            manufacturer: "Motorala".to_owned(),
            summary: "A phone".to_owned(),
            price: 100,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Review {
    title: String,
    rating: u8,
}

impl Review {
    #[allow(dead_code)]
    pub fn new(title: &str, rating: u8) -> Review {
        Review { title: title.to_owned(), rating }
    }
}

#[allow(dead_code)]
pub fn read_file(path: &str) -> String {
    let mut f = File::open(path).unwrap();
    let mut input = String::new();
    f.read_to_string(&mut input).unwrap();
    // replace to make tests pass in windows
    input.replace("\r\n", "\n")
}
