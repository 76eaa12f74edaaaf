//! Incremental Server-Sent Events decoder.
//!
//! Bytes arrive in arbitrary chunks; frames are emitted once their terminating
//! blank line has been seen.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event name, `message` when the frame has none
    pub event: String,
    /// `data:` lines joined with `\n`
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and collect every frame it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&raw[..raw.len() - 1]);
            let line = text.strip_suffix('\r').unwrap_or(&text);
            if let Some(frame) = self.take_line(line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// End of stream: dispatch whatever frame is still open, including a
    /// last line that never got its newline.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let rest = std::mem::take(&mut self.buffer);
        if !rest.is_empty() {
            let text = String::from_utf8_lossy(&rest);
            let line = text.strip_suffix('\r').unwrap_or(&text);
            if let Some(frame) = self.take_line(line) {
                return Some(frame);
            }
        }
        self.dispatch()
    }

    fn take_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id / retry carry nothing the feed needs
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        if self.data.is_empty() && event.is_none() {
            return None;
        }
        Some(SseFrame {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: next\nda").is_empty());
        assert!(decoder.push(b"ta: {\"a\":1}\n").is_empty());

        let frames = decoder.push(b"\n");
        assert_eq!(
            frames,
            vec![SseFrame { event: "next".to_string(), data: "{\"a\":1}".to_string() }]
        );
    }

    #[test]
    fn test_crlf_comments_and_multiline_data() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(
            b": keep-alive\r\n\r\ndata: one\r\ndata: two\r\n\r\nevent: complete\r\n\r\n",
        );
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "one\ntwo");
        assert_eq!(frames[1].event, "complete");
        assert_eq!(frames[1].data, "");
    }

    #[test]
    fn test_finish_flushes_unterminated_frame() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: next\ndata: {}").is_empty());

        let frame = decoder.finish().unwrap();
        assert_eq!(frame.event, "next");
        assert_eq!(frame.data, "{}");
        assert_eq!(decoder.finish(), None);

        assert!(decoder.push(b"data: tail\n").is_empty());
        assert_eq!(decoder.finish().unwrap().data, "tail");
    }

    #[test]
    fn test_multibyte_split() {
        let mut decoder = SseDecoder::new();
        let bytes = "data: caf\u{e9}\n\n".as_bytes();
        let (head, tail) = bytes.split_at(10);
        assert!(decoder.push(head).is_empty());
        let frames = decoder.push(tail);
        assert_eq!(frames[0].data, "caf\u{e9}");
    }
}
