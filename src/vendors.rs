//! Vendor endpoint registry. Maps camera vendor labels to the ordered HTTP
//! snapshot/stream paths and RTSP URL templates known for that product line.

use std::collections::HashMap;

/// Relative HTTP paths per vendor, most commonly exposed first
const HTTP_TEMPLATES: &[(&str, &[&str])] = &[
    ("dahua", &["/cgi-bin/mjpg/video.cgi", "/cgi-bin/snapshot.cgi"]),
    (
        "hikvision",
        &[
            "/ISAPI/Streaming/channels/1/picture",
            "/onvif-http/snapshot?Profile_1",
        ],
    ),
    (
        "axis",
        &[
            "/axis-cgi/mjpg/video.cgi",
            "/jpg/image.jpg",
            "/axis-cgi/mjpg/video.cgi?resolution=640x480",
        ],
    ),
    ("foscam", &["/videostream.cgi", "/snapshot.cgi"]),
    ("samsung", &["/cgi-bin/video.jpg"]),
    ("trendnet", &["/cgi/mjpg/mjpg.cgi", "/image/jpeg.cgi"]),
    ("sony", &["/image"]),
];

/// Full RTSP URL templates per vendor; `{ip}` is the address placeholder
const RTSP_TEMPLATES: &[(&str, &[&str])] = &[
    ("sony", &["rtsp://{ip}/media/video1"]),
    (
        "samsung",
        &[
            "rtsp://{ip}:554/profile1/media.smp",
            "rtsp://{ip}:554/profile2/media.smp",
        ],
    ),
    (
        "hikvision",
        &[
            "rtsp://{ip}:554/Streaming/Channels/101",
            "rtsp://{ip}:554/Streaming/Channels/102",
        ],
    ),
    (
        "dahua",
        &[
            "rtsp://{ip}:554/cam/realmonitor?channel=1&subtype=0",
            "rtsp://{ip}:554/cam/realmonitor?channel=1&subtype=1",
        ],
    ),
    (
        "axis",
        &[
            "rtsp://{ip}/axis-media/media.amp",
            "rtsp://{ip}/axis-media/media.amp?videocodec=h264",
            "rtsp://{ip}/axis-media/media.amp?streamprofile=Profile_1",
        ],
    ),
    (
        "foscam",
        &["rtsp://{ip}:554/videoMain", "rtsp://{ip}:554/videoSub"],
    ),
    (
        "trendnet",
        &["rtsp://{ip}/h264_vga.sdp", "rtsp://{ip}/h264_hd.sdp"],
    ),
];

/// Immutable vendor -> endpoint template registry. Built once at startup and
/// passed by reference into the orchestrator.
pub struct VendorRegistry {
    http: HashMap<String, Vec<String>>,
    rtsp: HashMap<String, Vec<String>>,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self::from_entries(HTTP_TEMPLATES, RTSP_TEMPLATES)
    }

    /// Build a registry from explicit template tables. Labels are stored
    /// lower-cased so lookup is case-insensitive.
    pub fn from_entries(http: &[(&str, &[&str])], rtsp: &[(&str, &[&str])]) -> Self {
        let build = |entries: &[(&str, &[&str])]| -> HashMap<String, Vec<String>> {
            entries
                .iter()
                .map(|(vendor, templates)| {
                    let templates = templates.iter().map(|t| t.to_string()).collect();
                    (vendor.to_lowercase(), templates)
                })
                .collect()
        };

        Self {
            http: build(http),
            rtsp: build(rtsp),
        }
    }

    /// Whether any probing is defined for this vendor. Membership in the HTTP
    /// table is the gate for the whole target, matching the discovery source's
    /// labeling of camera products.
    pub fn contains(&self, vendor: &str) -> bool {
        self.http.contains_key(&vendor.to_lowercase())
    }

    /// Ordered HTTP paths for a vendor; empty for unknown vendors
    pub fn http_templates(&self, vendor: &str) -> &[String] {
        self.http
            .get(&vendor.to_lowercase())
            .map(|templates| templates.as_slice())
            .unwrap_or(&[])
    }

    /// Ordered RTSP URL templates for a vendor; empty for unknown vendors
    pub fn rtsp_templates(&self, vendor: &str) -> &[String] {
        self.rtsp
            .get(&vendor.to_lowercase())
            .map(|templates| templates.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
