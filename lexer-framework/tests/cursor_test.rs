use lexer_framework::{Cursor, Position};

#[test]
fn test_cursor_new() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.position(), Position::new());
    assert!(!cursor.is_eof());
}

#[test]
fn test_cursor_peek() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.peek(), Some('h'));
    assert_eq!(cursor.offset(), 0); // Should not advance
}

#[test]
fn test_cursor_advance() {
    let mut cursor = Cursor::new("hello");
    assert_eq!(cursor.advance(), Some('h'));
    assert_eq!(cursor.offset(), 1);
    assert_eq!(cursor.position().column, 2);
    assert_eq!(cursor.peek(), Some('e'));
}

#[test]
fn test_cursor_is_eof() {
    let mut cursor = Cursor::new("hi");
    cursor.advance();
    assert!(!cursor.is_eof());
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_cursor_empty_string() {
    let mut cursor = Cursor::new("");
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_cursor_position_tracking() {
    let mut cursor = Cursor::new("a\nb\nc");

    cursor.advance(); // 'a'
    assert_eq!(cursor.position().line, 1);
    assert_eq!(cursor.position().column, 2);

    cursor.advance(); // '\n'
    assert_eq!(cursor.position().line, 2);
    assert_eq!(cursor.position().column, 1);

    cursor.advance(); // 'b'
    assert_eq!(cursor.position(), Position::at(2, 2, 3));
}

#[test]
fn test_cursor_advance_bytes() {
    let mut cursor = Cursor::new("hello world");
    assert_eq!(cursor.advance_bytes(6), "hello ");
    assert_eq!(cursor.remaining(), "world");
    assert_eq!(cursor.position().column, 7);
}

#[test]
fn test_cursor_advance_bytes_beyond_eof() {
    let mut cursor = Cursor::new("hi");
    assert_eq!(cursor.advance_bytes(10), "hi");
    assert!(cursor.is_eof());
    assert_eq!(cursor.offset(), 2);
}

#[test]
fn test_cursor_at_offset() {
    let cursor = Cursor::at("ab\ncd", 4);
    assert_eq!(cursor.offset(), 4);
    assert_eq!(cursor.peek(), Some('d'));
    assert_eq!(cursor.position(), Position::at(2, 2, 4));
}

#[test]
fn test_cursor_at_clamps_to_input() {
    let cursor = Cursor::at("abc", 99);
    assert_eq!(cursor.offset(), 3);
    assert!(cursor.is_eof());
}

#[test]
fn test_cursor_at_snaps_to_char_boundary() {
    // 'é' is two bytes; offset 2 is inside it.
    let cursor = Cursor::at("aéb", 2);
    assert_eq!(cursor.offset(), 1);
    assert_eq!(cursor.peek(), Some('é'));
}

#[test]
fn test_cursor_checkpoint_restore() {
    let mut cursor = Cursor::new("hello");
    cursor.advance(); // 'h'
    cursor.advance(); // 'e'

    let checkpoint = cursor.checkpoint();
    assert_eq!(cursor.offset(), 2);

    cursor.advance_bytes(2);
    assert_eq!(cursor.offset(), 4);

    cursor.restore(checkpoint);
    assert_eq!(cursor.offset(), 2);
    assert_eq!(cursor.peek(), Some('l'));
    assert_eq!(cursor.position().column, 3);
}

#[test]
fn test_cursor_unicode_chinese() {
    let mut cursor = Cursor::new("你好世界");
    assert_eq!(cursor.peek(), Some('你'));
    cursor.advance();
    assert_eq!(cursor.peek(), Some('好'));
    assert_eq!(cursor.offset(), 3);
    assert_eq!(cursor.position().column, 2);
}

#[test]
fn test_cursor_unicode_emoji() {
    let mut cursor = Cursor::new("😀🎉🚀");
    cursor.advance();
    assert_eq!(cursor.peek(), Some('🎉'));
    assert_eq!(cursor.offset(), 4);
    assert_eq!(cursor.position().column, 2);
}
