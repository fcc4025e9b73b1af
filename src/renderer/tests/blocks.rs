use pretty_assertions::assert_eq;

use super::render_template;
use crate::context::Values;
use crate::renderer::{expand_block, find_block, render_rows, Renderer};
use crate::row;
use crate::value::Row;

#[test]
fn render_each_block_once_per_row() {
    let mut values = Values::new();
    values.insert("items", vec![row! { "n" => "1" }, row! { "n" => "2" }]);

    let result = render_template("<ul>{@each:items}<li>{@n}</li>{@endeach:items}</ul>", &values);
    assert_eq!(result.unwrap(), "<ul><li>1</li>\n<li>2</li></ul>");
}

#[test]
fn render_each_block_keeps_row_order() {
    let rows: Vec<Row> = (0..5).rev().map(|i| row! { "i" => i }).collect();
    let mut values = Values::new();
    values.insert("r", rows);

    let result = render_template("{@each:r}{@i}{@endeach:r}", &values);
    assert_eq!(result.unwrap(), "4\n3\n2\n1\n0");
}

#[test]
fn render_empty_row_list_removes_the_block() {
    let mut values = Values::new();
    values.insert("items", Vec::<Row>::new());

    let result = render_template("<ul>{@each:items}<li>{@n}</li>{@endeach:items}</ul>", &values);
    assert_eq!(result.unwrap(), "<ul></ul>");
}

#[test]
fn rows_dont_share_substitutions() {
    let mut values = Values::new();
    values.insert("rows", vec![row! { "a" => "first", "b" => "B" }, row! { "a" => "second" }]);

    let result = render_template("{@each:rows}{@a}/{@b}{@endeach:rows}", &values);
    assert_eq!(result.unwrap(), "first/B\nsecond/{@b}");
}

#[test]
fn row_entries_cascade_in_insertion_order() {
    let mut values = Values::new();
    values.insert("rows", vec![row! { "a" => "{@b}", "b" => "B" }, row! { "b" => "B", "a" => "{@b}" }]);

    let result = render_template("{@each:rows}{@a}{@endeach:rows}", &values);
    assert_eq!(result.unwrap(), "B\n{@b}");
}

#[test]
fn block_keeps_surrounding_whitespace_of_its_body() {
    let mut values = Values::new();
    values.insert("serverglobal", vec![
        row! { "serverkey" => "HOME", "servervalue" => "/root" },
        row! { "serverkey" => "SHELL", "servervalue" => "/bin/sh" },
    ]);
    let tpl = "<table>\n{@each:serverglobal}\n  <tr><td>{@serverkey}</td><td>{@servervalue}</td></tr>\n{@endeach:serverglobal}\n</table>";

    assert_eq!(
        render_template(tpl, &values).unwrap(),
        "<table>\n\n  <tr><td>HOME</td><td>/root</td></tr>\n\n\n  <tr><td>SHELL</td><td>/bin/sh</td></tr>\n\n</table>"
    );
}

#[test]
fn only_first_block_of_a_name_is_expanded() {
    let mut values = Values::new();
    values.insert("r", vec![row! { "x" => 1 }]);

    let result = render_template("{@each:r}a{@x}{@endeach:r}|{@each:r}b{@x}{@endeach:r}", &values);
    assert_eq!(result.unwrap(), "a1|{@each:r}b{@x}{@endeach:r}");
}

#[test]
fn same_name_can_be_expanded_twice() {
    let mut values = Values::new();
    values.insert("r", vec![row! { "x" => 1 }]);
    let first = render_template("{@each:r}a{@x}{@endeach:r}|{@each:r}b{@x}{@endeach:r}", &values)
        .unwrap();
    let second = render_template(&first, &values).unwrap();
    assert_eq!(second, "a1|b1");
}

#[test]
fn scalar_outside_block_is_replaced_inside_too() {
    let mut values = Values::new();
    values.insert("unit", "kg");
    values.insert("weights", vec![row! { "w" => 1 }, row! { "w" => 2 }]);

    let result = render_template("{@each:weights}{@w}{@unit}{@endeach:weights}", &values);
    assert_eq!(result.unwrap(), "1kg\n2kg");
}

#[test]
fn block_names_with_special_characters_are_literal() {
    let mut values = Values::new();
    values.insert("a.*+?(b)", vec![row! { "x" => "1" }]);

    let result = render_template("[{@each:a.*+?(b)}{@x}{@endeach:a.*+?(b)}]", &values);
    assert_eq!(result.unwrap(), "[1]");
}

#[test]
fn rows_can_use_another_separator() {
    let mut values = Values::new();
    values.insert("r", vec![row! { "x" => 1 }, row! { "x" => 2 }, row! { "x" => 3 }]);

    let result = Renderer::new("{@each:r}{@x}{@endeach:r}", &values).with_row_separator(", ").render();
    assert_eq!(result.unwrap(), "1, 2, 3");
}

#[test]
fn find_block_returns_the_body_and_span() {
    let tpl = "ab{@each:r}<{@x}>{@endeach:r}cd";
    let block = find_block(tpl, "r").unwrap();
    assert_eq!(block.body, "<{@x}>");
    assert_eq!(&tpl[block.start..block.end], "{@each:r}<{@x}>{@endeach:r}");
}

#[test]
fn find_block_with_empty_body() {
    let block = find_block("{@each:r}{@endeach:r}", "r").unwrap();
    assert_eq!(block.body, "");
    assert_eq!(block.end, "{@each:r}{@endeach:r}".len());
}

#[test]
fn render_rows_joins_with_separator() {
    let rows = vec![row! { "n" => 1 }, row! { "n" => 2 }];
    assert_eq!(render_rows("<{@n}>", &rows, "\n"), "<1>\n<2>");
    assert_eq!(render_rows("<{@n}>", &[], "\n"), "");
    assert_eq!(render_rows("static", &[Row::new()], "\n"), "static");
}

#[test]
fn expand_block_leaves_other_blocks_alone() {
    let tpl = "{@each:a}{@x}{@endeach:a}{@each:b}{@x}{@endeach:b}";
    let out = expand_block(tpl, "b", &[row! { "x" => "B" }], "\n").unwrap();
    assert_eq!(out, "{@each:a}{@x}{@endeach:a}B");
}
