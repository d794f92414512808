use serde::Serialize;
use validator::Validate;

use super::{genre_selection, required, us_state, web_url, FieldErrors, Form, FormData};
use crate::models::NewArtist;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ArtistForm {
    #[validate(custom(function = "required"), length(max = 120, message = "Field cannot be longer than 120 characters."))]
    pub name: String,
    #[validate(custom(function = "required"), length(max = 120, message = "Field cannot be longer than 120 characters."))]
    pub city: String,
    #[validate(custom(function = "us_state"))]
    pub state: String,
    #[validate(length(max = 50, message = "Field cannot be longer than 50 characters."))]
    pub phone: Option<String>,
    #[validate(custom(function = "web_url"), length(max = 500, message = "Field cannot be longer than 500 characters."))]
    pub image_link: Option<String>,
    #[validate(custom(function = "web_url"), length(max = 500, message = "Field cannot be longer than 500 characters."))]
    pub facebook_link: Option<String>,
    #[validate(length(max = 500, message = "Field cannot be longer than 500 characters."))]
    pub website_link: Option<String>,
    #[validate(custom(function = "genre_selection"))]
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_data(data: &FormData) -> Self {
        ArtistForm {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.optional("phone"),
            image_link: data.optional("image_link"),
            facebook_link: data.optional("facebook_link"),
            website_link: data.optional("website_link"),
            genres: data.values("genres"),
            seeking_venue: data.flag("seeking_venue"),
            seeking_description: data.optional("seeking_description"),
        }
    }
}

impl Form for ArtistForm {
    type Record = NewArtist;
    const NAME: &'static str = "artist";

    fn validate_record(&self) -> Result<NewArtist, FieldErrors> {
        self.validate()?;

        Ok(NewArtist {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website_link: self.website_link.clone(),
            genres: self.genres.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        })
    }
}
