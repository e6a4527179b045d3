//! Parsed media metadata
//!
//! A `MediaRecord` is built once from probe JSON and never mutated. It carries
//! the container-level numbers (duration, size, bitrate) and the attributes of
//! the first video stream, if there is one.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::Unusable;

/// Attributes of the selected video stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStream {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub codec_name: Option<String>,
    pub codec_tag_string: Option<String>,
    pub pix_fmt: Option<String>,
    pub display_aspect_ratio: Option<String>,
    /// Raw frame rate as reported, `"num/den"` or a bare number
    pub r_frame_rate: Option<String>,
}

impl VideoStream {
    /// Frame rate in frames per second.
    ///
    /// `"num/den"` is divided out; a zero denominator gives 0. A bare number is
    /// used as is. Anything unparsable, or a missing rate, gives 0.
    #[must_use]
    pub fn frame_rate(&self) -> f64 {
        let Some(raw) = self.r_frame_rate.as_deref() else {
            return 0.0;
        };
        let raw = raw.trim();

        if let Some((num, den)) = raw.split_once('/') {
            return match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
                (Ok(_), Ok(den)) if den == 0.0 => 0.0,
                (Ok(num), Ok(den)) => num / den,
                _ => 0.0,
            };
        }

        raw.parse::<f64>().unwrap_or(0.0)
    }
}

/// Immutable metadata snapshot for one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaRecord {
    /// Duration in seconds
    pub duration: f64,
    /// Size in bytes
    pub size_bytes: f64,
    /// Bitrate in the probe's kbps-equivalent scale (`bit_rate / 1000`)
    pub bitrate: f64,
    /// First stream whose `codec_type` is `video`
    pub video_stream: Option<VideoStream>,
}

impl MediaRecord {
    /// Create a record without a video stream
    #[must_use]
    pub const fn new(duration: f64, size_bytes: f64, bitrate: f64) -> Self {
        Self {
            duration,
            size_bytes,
            bitrate,
            video_stream: None,
        }
    }

    /// Attach the video stream
    #[must_use]
    pub fn with_video(mut self, stream: VideoStream) -> Self {
        self.video_stream = Some(stream);
        self
    }

    /// Decode the JSON printed by `ffprobe -print_format json -show_format
    /// -show_streams`.
    ///
    /// # Errors
    ///
    /// Returns `Unusable` when the output is empty or malformed, or when the
    /// `format` block or the `streams` list is missing or empty.
    pub fn from_probe_json(output: &[u8]) -> Result<Self, Unusable> {
        if output.iter().all(u8::is_ascii_whitespace) {
            return Err(Unusable::EmptyOutput);
        }

        let probe: ProbeOutput =
            serde_json::from_slice(output).map_err(|e| Unusable::Malformed(e.to_string()))?;

        let format = match probe.format {
            Some(map) if !map.is_empty() => map,
            _ => return Err(Unusable::MissingFormat),
        };
        let streams = match probe.streams {
            Some(streams) if !streams.is_empty() => streams,
            _ => return Err(Unusable::MissingStreams),
        };

        let format: ProbeFormat = serde_json::from_value(Value::Object(format))
            .map_err(|e| Unusable::Malformed(e.to_string()))?;

        let video_stream = streams
            .into_iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .map(ProbeStream::into_video_stream);

        Ok(Self {
            duration: ProbeValue::number_or_zero(format.duration.as_ref()),
            size_bytes: ProbeValue::number_or_zero(format.size.as_ref()),
            bitrate: ProbeValue::number_or_zero(format.bit_rate.as_ref()) / 1000.0,
            video_stream,
        })
    }
}

/// Top level of the probe JSON document
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<Map<String, Value>>,
    #[serde(default)]
    streams: Option<Vec<ProbeStream>>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    duration: Option<ProbeValue>,
    #[serde(default)]
    size: Option<ProbeValue>,
    #[serde(default)]
    bit_rate: Option<ProbeValue>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<ProbeValue>,
    #[serde(default)]
    height: Option<ProbeValue>,
    #[serde(default)]
    codec_name: Option<String>,
    #[serde(default)]
    codec_tag_string: Option<String>,
    #[serde(default)]
    pix_fmt: Option<String>,
    #[serde(default)]
    display_aspect_ratio: Option<String>,
    #[serde(default)]
    r_frame_rate: Option<ProbeValue>,
}

impl ProbeStream {
    fn into_video_stream(self) -> VideoStream {
        let dimension = |v: Option<&ProbeValue>| {
            v.and_then(ProbeValue::as_f64)
                .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
                .map(|n| n as u32)
        };

        VideoStream {
            width: dimension(self.width.as_ref()),
            height: dimension(self.height.as_ref()),
            codec_name: self.codec_name,
            codec_tag_string: self.codec_tag_string,
            pix_fmt: self.pix_fmt,
            display_aspect_ratio: self.display_aspect_ratio,
            r_frame_rate: self.r_frame_rate.map(ProbeValue::into_text),
        }
    }
}

/// ffprobe prints most numbers as strings; accept either form
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ProbeValue {
    Number(f64),
    Text(String),
}

impl ProbeValue {
    fn as_f64(&self) -> Option<f64> {
        let number = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        number.filter(|n| n.is_finite())
    }

    fn number_or_zero(value: Option<&Self>) -> f64 {
        value.and_then(Self::as_f64).map_or(0.0, |n| n.max(0.0))
    }

    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_JSON: &str = r#"{
        "streams": [
            { "index": 0, "codec_type": "audio", "codec_name": "aac" },
            {
                "index": 1,
                "codec_type": "video",
                "codec_name": "h264",
                "codec_tag_string": "avc1",
                "width": 1920,
                "height": 1080,
                "pix_fmt": "yuv420p",
                "display_aspect_ratio": "16:9",
                "r_frame_rate": "30000/1001"
            },
            { "index": 2, "codec_type": "video", "codec_name": "mjpeg", "width": 320, "height": 240 }
        ],
        "format": {
            "filename": "movie.mp4",
            "duration": "120.500000",
            "size": "209715200",
            "bit_rate": "13922000"
        }
    }"#;

    #[test]
    fn test_from_probe_json_reads_format_and_first_video_stream() {
        let record = MediaRecord::from_probe_json(PROBE_JSON.as_bytes()).unwrap();
        assert_eq!(record.duration, 120.5);
        assert_eq!(record.size_bytes, 209_715_200.0);
        assert_eq!(record.bitrate, 13_922.0);

        let video = record.video_stream.unwrap();
        assert_eq!(video.codec_name.as_deref(), Some("h264"));
        assert_eq!(video.width, Some(1920));
        assert_eq!(video.height, Some(1080));
        assert_eq!(video.display_aspect_ratio.as_deref(), Some("16:9"));
        assert!((video.frame_rate() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_from_probe_json_defaults_missing_numbers_to_zero() {
        let json = r#"{ "format": { "filename": "x.mkv", "duration": "N/A" },
                        "streams": [ { "codec_type": "audio" } ] }"#;
        let record = MediaRecord::from_probe_json(json.as_bytes()).unwrap();
        assert_eq!(record, MediaRecord::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_probe_json_accepts_numeric_fields() {
        let json = r#"{ "format": { "duration": 10, "size": 2048, "bit_rate": 5000 },
                        "streams": [ { "codec_type": "video", "r_frame_rate": 25 } ] }"#;
        let record = MediaRecord::from_probe_json(json.as_bytes()).unwrap();
        assert_eq!(record.duration, 10.0);
        assert_eq!(record.bitrate, 5.0);
        assert_eq!(record.video_stream.unwrap().frame_rate(), 25.0);
    }

    #[test]
    fn test_from_probe_json_unusable_cases() {
        assert_eq!(MediaRecord::from_probe_json(b"  \n"), Err(Unusable::EmptyOutput));
        assert!(matches!(
            MediaRecord::from_probe_json(b"{ not json"),
            Err(Unusable::Malformed(_))
        ));
        assert_eq!(
            MediaRecord::from_probe_json(br#"{ "streams": [ { "codec_type": "video" } ] }"#),
            Err(Unusable::MissingFormat)
        );
        assert_eq!(
            MediaRecord::from_probe_json(br#"{ "format": {}, "streams": [ {} ] }"#),
            Err(Unusable::MissingFormat)
        );
        assert_eq!(
            MediaRecord::from_probe_json(br#"{ "format": { "size": "1" }, "streams": [] }"#),
            Err(Unusable::MissingStreams)
        );
    }

    #[test]
    fn test_frame_rate_parsing() {
        let stream = |rate: &str| VideoStream {
            r_frame_rate: Some(rate.to_string()),
            ..Default::default()
        };
        assert_eq!(stream("25/1").frame_rate(), 25.0);
        assert_eq!(stream("24/0").frame_rate(), 0.0);
        assert_eq!(stream("59.94").frame_rate(), 59.94);
        assert_eq!(stream("abc/1").frame_rate(), 0.0);
        assert_eq!(stream("garbage").frame_rate(), 0.0);
        assert_eq!(VideoStream::default().frame_rate(), 0.0);
    }
}
