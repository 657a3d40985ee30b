mod channel;

pub use channel::ChannelPusher;
