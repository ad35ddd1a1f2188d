//! Frame filter pipeline: a fixed-cadence capture → filter → present loop
//! with a closed set of image filters, one of which blurs faces found by an
//! SSD face detector running on ONNX Runtime.

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod region;
}

pub mod filtering {
    pub mod domain {
        pub mod control_snapshot;
        pub mod filter_error;
        pub mod filter_kind;
        pub mod frame_filter;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod detection;
        pub mod detection_network;
        pub mod detector_slot;
        pub mod face_detector;
        pub mod model_store;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod control_state;
        pub mod display_sink;
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod frame_loop;
    pub mod label;
    pub mod pipeline_logger;
    pub mod scheduler;
}
