pub mod photo;

pub use photo::{
    NewPhoto, Photo, PhotoCategory, PhotoFilter, PhotoResponse, UpdatePhotoRequest, UploadResponse,
};
