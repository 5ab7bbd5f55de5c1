pub mod page;
pub mod reply;
pub mod update;

pub use page::{Page, PageAction, PageRequest};
pub use reply::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, Reply, ReplyType};
pub use update::{CallbackQuery, Message, MessageEntity, Update, UpdateKind, User};
