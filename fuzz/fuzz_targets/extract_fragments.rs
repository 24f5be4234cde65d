#![no_main]

use std::io::{Cursor, Read};

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use netbuf::{Message, count_of, to_bytes, to_reader};

fuzz_target!(|fragments: Vec<Vec<u8>>| {
    let expected: Vec<u8> = fragments.concat();

    // Verify: concatenation matches and is presized exactly
    let out = to_bytes(fragments.clone()).unwrap();
    assert_eq!(out.len(), count_of(&fragments));
    assert_eq!(&out[..], &expected[..]);

    // Verify: reading fragment by fragment yields the same bytes
    let mut read = Vec::new();
    to_reader(fragments).unwrap().read_to_end(&mut read).unwrap();
    assert_eq!(read, expected);

    // Verify: stealing from a cursor at any offset returns the remainder
    let offset = expected.len() / 2;
    let mut cursor = Cursor::new(Bytes::from(expected.clone()));
    cursor.set_position(offset as u64);
    let stolen = to_bytes(Message::writer_to(cursor)).unwrap();
    assert_eq!(&stolen[..], &expected[offset..]);
});
