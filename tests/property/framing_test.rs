// tests/property/framing_test.rs

//! The decoder must produce the same frames however the stream is fragmented.

use bytes::{Bytes, BytesMut};
use filechat::core::protocol::FrameCodec;
use proptest::prelude::*;
use tokio_util::codec::Decoder;

const DELIMITER: u8 = b';';

/// Frame bodies that never contain the delimiter. Empty bodies are allowed.
fn frame_body() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no delimiter", |b| *b != DELIMITER), 0..64)
}

/// Feeds `stream` to a fresh codec in chunks cut at `cuts` and collects every frame.
fn decode_in_chunks(stream: &[u8], cuts: &[usize]) -> Vec<Bytes> {
    let mut codec = FrameCodec::new(DELIMITER, 1 << 20);
    let mut buf = BytesMut::new();
    let mut frames = Vec::new();

    let mut points: Vec<usize> = cuts.iter().map(|c| c % (stream.len() + 1)).collect();
    points.push(stream.len());
    points.sort_unstable();

    let mut start = 0;
    for end in points {
        buf.extend_from_slice(&stream[start..end]);
        start = end;
        while let Some(frame) = codec.decode(&mut buf).unwrap() {
            frames.push(frame);
        }
    }
    frames
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_fragmentation_does_not_change_frames(
        bodies in prop::collection::vec(frame_body(), 0..20),
        cuts in prop::collection::vec(any::<usize>(), 0..32),
    ) {
        let mut stream = Vec::new();
        for body in &bodies {
            stream.extend_from_slice(body);
            stream.push(DELIMITER);
        }

        let expected: Vec<Bytes> = bodies
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| Bytes::copy_from_slice(b))
            .collect();

        prop_assert_eq!(decode_in_chunks(&stream, &[]), expected.clone());
        prop_assert_eq!(decode_in_chunks(&stream, &cuts), expected);
    }

    #[test]
    fn test_byte_at_a_time_matches_whole_stream(
        bodies in prop::collection::vec(frame_body(), 1..10),
    ) {
        let mut stream = Vec::new();
        for body in &bodies {
            stream.extend_from_slice(body);
            stream.push(DELIMITER);
        }
        let every_byte: Vec<usize> = (0..stream.len()).collect();
        prop_assert_eq!(
            decode_in_chunks(&stream, &every_byte),
            decode_in_chunks(&stream, &[])
        );
    }

    #[test]
    fn test_unterminated_input_never_yields_a_frame(body in frame_body()) {
        let mut codec = FrameCodec::new(DELIMITER, 1 << 20);
        let mut buf = BytesMut::from(&body[..]);
        prop_assert_eq!(codec.decode(&mut buf).unwrap(), None);
        prop_assert_eq!(buf.len(), body.len());
    }

    #[test]
    fn test_buffer_limit_is_exact(limit in 1usize..128, extra in 0usize..16) {
        let mut codec = FrameCodec::new(DELIMITER, limit);
        let mut buf = BytesMut::from(&vec![b'x'; limit + extra][..]);
        let result = codec.decode(&mut buf);
        prop_assert_eq!(result.is_err(), extra > 0);
    }
}
