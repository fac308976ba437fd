//! Invalidation tag vocabulary. A caller convention, not enforced by the
//! coordinator: reads declare what they provide, writes declare what they
//! refresh.

use store::RecordId;

pub const CAT_LIST: &str = "cats:list";
pub const SLIDESHOW_LIST: &str = "slideshows:list";

pub fn cat(id: RecordId) -> String {
    format!("cats:{id}")
}

pub fn slideshow(id: RecordId) -> String {
    format!("slideshows:{id}")
}

pub fn slideshows_by_cat(cat_id: RecordId) -> String {
    format!("slideshows:by_cat:{cat_id}")
}

pub fn slideshows_search(term: &str) -> String {
    format!("slideshows:search:{term}")
}
