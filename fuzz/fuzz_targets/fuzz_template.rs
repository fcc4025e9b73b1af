#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ltpl;

use ltpl::{row, Template, Values};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = String::from_utf8(data.to_vec()){
        if let Ok(tpl) = Template::new("fuzz", None, &s) {
            let _ = tpl.validate_blocks();
        }

        let mut values = Values::new();
        values.insert("name", "{@value}");
        values.insert("value", "fuzz");
        values.insert("rows", vec![row! { "name" => "a" }, row! { "name" => "b" }]);
        let _ = ltpl::render_str(&s, &values);
    }
});
