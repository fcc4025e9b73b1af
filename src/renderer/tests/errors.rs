use super::render_template;
use crate::context::Values;
use crate::errors::ErrorKind;
use crate::renderer::find_block;
use crate::row;
use crate::value::Row;

#[test]
fn missing_block_aborts_the_render() {
    let mut values = Values::new();
    values.insert("title", "Hello");
    values.insert("items", vec![row! { "n" => 1 }]);

    let result = render_template("<h1>{@title}</h1>", &values);
    let err = result.unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.kind, ErrorKind::MissingBlock(ref name) if name == "items"));
}

#[test]
fn empty_row_list_still_needs_its_block() {
    let mut values = Values::new();
    values.insert("items", Vec::<Row>::new());

    let err = render_template("nothing here", &values).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingBlock(_)));
}

#[test]
fn block_missing_one_tag_is_missing() {
    let inputs = vec!["{@each:items} no end", "no start {@endeach:items}", "{@each:item}{@endeach:item}"];
    for input in inputs {
        let err = find_block(input, "items").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MissingBlock(_)), "{:?}", input);
    }
}

#[test]
fn endeach_before_each_is_malformed() {
    let mut values = Values::new();
    values.insert("items", vec![row! { "n" => 1 }]);

    let err = render_template("{@endeach:items}{@n}{@each:items}", &values).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.kind, ErrorKind::MalformedBlock(ref name) if name == "items"));
}

#[test]
fn first_endeach_decides_the_order() {
    let err = find_block("{@endeach:r}{@each:r}x{@endeach:r}", "r").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedBlock(_)));
}
