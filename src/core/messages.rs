//! Client-facing message texts.
//!
//! These strings are part of the wire contract consumed by existing bookshelf
//! clients and must stay byte-for-byte stable.

pub const BOOK_ADDED: &str = "Buku berhasil ditambahkan";
pub const BOOK_ADD_FAILED: &str = "Buku gagal ditambahkan";
pub const ADD_MISSING_NAME: &str = "Gagal menambahkan buku. Mohon isi nama buku";
pub const ADD_READ_PAGE_EXCEEDS: &str =
    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";

pub const BOOK_UPDATED: &str = "Buku berhasil diperbarui";
pub const UPDATE_MISSING_NAME: &str = "Gagal memperbarui buku. Mohon isi nama buku";
pub const UPDATE_READ_PAGE_EXCEEDS: &str =
    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";
pub const UPDATE_ID_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";

pub const BOOK_DELETED: &str = "Buku berhasil dihapus";
pub const DELETE_ID_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

pub const BOOK_NOT_FOUND: &str = "Buku tidak ditemukan";
