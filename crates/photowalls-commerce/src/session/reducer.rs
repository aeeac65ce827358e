//! User actions and the pure session reducer.

use crate::catalog::CategoryFilter;
use crate::customize::UploadToken;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::session::{ProductSelection, SessionState, View};
use serde::{Deserialize, Serialize};

/// Everything a shopper can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    SelectCategory(CategoryFilter),
    ShowView(View),
    OpenProduct(ProductId),
    CloseProduct,
    SelectSize(String),
    SelectMaterial(String),
    AddToCart,
    ApplyPromo(String),
    OpenUpload,
    CloseUpload,
    /// A file was picked; its bytes arrive later with `CompleteUpload`.
    BeginUpload {
        file_name: String,
        media_type: String,
        byte_len: u64,
    },
    CompleteUpload {
        token: UploadToken,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
    SelectUploadSize(String),
    SelectUploadMaterial(String),
    ChooseAnotherImage,
    CommitUpload,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectCategory(_) => "select_category",
            Action::ShowView(_) => "show_view",
            Action::OpenProduct(_) => "open_product",
            Action::CloseProduct => "close_product",
            Action::SelectSize(_) => "select_size",
            Action::SelectMaterial(_) => "select_material",
            Action::AddToCart => "add_to_cart",
            Action::ApplyPromo(_) => "apply_promo",
            Action::OpenUpload => "open_upload",
            Action::CloseUpload => "close_upload",
            Action::BeginUpload { .. } => "begin_upload",
            Action::CompleteUpload { .. } => "complete_upload",
            Action::SelectUploadSize(_) => "select_upload_size",
            Action::SelectUploadMaterial(_) => "select_upload_material",
            Action::ChooseAnotherImage => "choose_another_image",
            Action::CommitUpload => "commit_upload",
        }
    }
}

/// Apply `action` to `state`.
///
/// `state` is never modified. On error the caller keeps the state it had.
pub fn reduce(state: &SessionState, action: Action) -> Result<SessionState, CommerceError> {
    let mut next = state.clone();

    match action {
        Action::SelectCategory(filter) => {
            next.category = filter;
        }
        Action::ShowView(view) => {
            next.view = view;
        }
        Action::OpenProduct(id) => {
            let product = state.shop.catalog.get(&id)?;
            next.selection = Some(ProductSelection::open(product.clone()));
        }
        Action::CloseProduct => {
            next.selection = None;
        }
        Action::SelectSize(size) => {
            let selection = state.selection.as_ref().ok_or(CommerceError::NoProductSelected)?;
            next.selection = Some(selection.select_size(&size)?);
        }
        Action::SelectMaterial(material) => {
            let selection = state.selection.as_ref().ok_or(CommerceError::NoProductSelected)?;
            next.selection = Some(selection.select_material(&material)?);
        }
        Action::AddToCart => {
            let selection = state.selection.as_ref().ok_or(CommerceError::NoProductSelected)?;
            next.cart = selection.add_to_cart(&state.cart)?;
            next.selection = None;
        }
        Action::ApplyPromo(code) => {
            next.promo = Some(state.shop.promos.apply(&code)?);
        }
        Action::OpenUpload => {
            next.upload_open = true;
        }
        Action::CloseUpload => {
            next.upload_open = false;
        }
        Action::BeginUpload {
            file_name,
            media_type,
            byte_len,
        } => {
            let (flow, _token) =
                state
                    .upload
                    .begin(&file_name, &media_type, byte_len, &state.shop.uploads)?;
            next.upload = flow;
        }
        Action::CompleteUpload { token, bytes } => {
            next.upload = state.upload.complete(token, bytes)?;
        }
        Action::SelectUploadSize(size) => {
            next.upload = state.upload.select_size(&size, &state.shop.custom)?;
        }
        Action::SelectUploadMaterial(material) => {
            next.upload = state.upload.select_material(&material, &state.shop.custom)?;
        }
        Action::ChooseAnotherImage => {
            next.upload = state.upload.choose_another();
        }
        Action::CommitUpload => {
            let (flow, cart, _id) = state.upload.commit(&state.cart, &state.shop.custom)?;
            next.upload = flow;
            next.cart = cart;
            next.upload_open = false;
        }
    }

    Ok(next)
}
