mod action;
mod action_id;
mod dispatch_mapper;
mod dispatcher;
mod handler;
mod notification;
mod reducer;
mod state;
mod state_reader;
mod thunk;

pub mod testing;

pub use action::create_action;
pub use action::create_actions;
pub use action::ActionCreator;
pub use action::Actions;
pub use action_id::action_id;
pub use dispatch_mapper::rekey;
pub use dispatch_mapper::DispatchMapper;
pub use dispatcher::ChannelDispatcher;
pub use dispatcher::Dispatch;
pub use handler::asynchronous;
pub use handler::compose;
pub use handler::pure;
pub use handler::Flags;
pub use handler::Handler;
pub use notification::ActionError;
pub use notification::Notification;
pub use notification::Payload;
pub use reducer::handle_action;
pub use reducer::handle_actions;
pub use reducer::Reducer;
pub use reducer::SliceOverride;
pub use reducer::SliceReducer;
pub use reducer::StoreOverride;
pub use reducer::StoreReducer;
pub use state::AsyncSlice;
pub use state::Slice;
pub use state::StoreState;
pub use state::Value;
pub use state_reader::ReadState;
pub use thunk::ActionResult;
pub use thunk::Context;
pub use thunk::Outcome;
pub use thunk::Thunk;
