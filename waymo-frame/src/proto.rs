//! Protobuf messages of the sensor frame.
//!
//! Only the fields used by the converter are declared. Other fields in the
//! serialized frame are skipped while decoding.

use crate::common::*;

/// One timestamped snapshot of a driving segment.
#[derive(Clone, PartialEq, Message)]
pub struct Frame {
    #[prost(message, optional, tag = "1")]
    pub context: Option<Context>,
    #[prost(int64, optional, tag = "2")]
    pub timestamp_micros: Option<i64>,
    #[prost(message, repeated, tag = "4")]
    pub images: Vec<CameraImage>,
    #[prost(message, repeated, tag = "8")]
    pub camera_labels: Vec<CameraLabels>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Context {
    /// The segment name.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
}

/// A compressed image from one camera.
#[derive(Clone, PartialEq, Message)]
pub struct CameraImage {
    #[prost(enumeration = "CameraName", optional, tag = "1")]
    pub name: Option<i32>,
    /// JPEG bytes.
    #[prost(bytes = "vec", optional, tag = "2")]
    pub image: Option<Vec<u8>>,
}

/// The 2D labels of one camera.
#[derive(Clone, PartialEq, Message)]
pub struct CameraLabels {
    #[prost(enumeration = "CameraName", optional, tag = "1")]
    pub name: Option<i32>,
    #[prost(message, repeated, tag = "2")]
    pub labels: Vec<Label>,
}

/// An annotated object.
#[derive(Clone, PartialEq, Message)]
pub struct Label {
    #[prost(message, optional, tag = "1")]
    pub r#box: Option<label::Box>,
    /// The object class, one of [label::Type].
    #[prost(enumeration = "label::Type", optional, tag = "3")]
    pub r#type: Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub id: Option<String>,
}

pub mod label {
    use crate::common::*;

    /// A box in pixel units for camera labels.
    ///
    /// `length` extends along the x axis and `width` along the y axis.
    #[derive(Clone, PartialEq, Message)]
    pub struct Box {
        #[prost(double, optional, tag = "1")]
        pub center_x: Option<f64>,
        #[prost(double, optional, tag = "2")]
        pub center_y: Option<f64>,
        #[prost(double, optional, tag = "3")]
        pub center_z: Option<f64>,
        #[prost(double, optional, tag = "5")]
        pub length: Option<f64>,
        #[prost(double, optional, tag = "4")]
        pub width: Option<f64>,
        #[prost(double, optional, tag = "6")]
        pub height: Option<f64>,
        #[prost(double, optional, tag = "7")]
        pub heading: Option<f64>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Unknown = 0,
        Vehicle = 1,
        Pedestrian = 2,
        Sign = 3,
        Cyclist = 4,
    }
}

/// The camera position on the vehicle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[repr(i32)]
pub enum CameraName {
    Unknown = 0,
    Front = 1,
    FrontLeft = 2,
    FrontRight = 3,
    SideLeft = 4,
    SideRight = 5,
}
