mod aligned;

pub use aligned::AlignedBuffer;
