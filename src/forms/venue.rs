use serde::Serialize;
use validator::Validate;

use super::{genre_selection, required, us_state, web_url, FieldErrors, Form, FormData};
use crate::models::NewVenue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct VenueForm {
    #[validate(custom(function = "required"), length(max = 120, message = "Field cannot be longer than 120 characters."))]
    pub name: String,
    #[validate(custom(function = "required"), length(max = 120, message = "Field cannot be longer than 120 characters."))]
    pub city: String,
    #[validate(custom(function = "us_state"))]
    pub state: String,
    #[validate(custom(function = "required"), length(max = 200, message = "Field cannot be longer than 200 characters."))]
    pub address: String,
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
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_data(data: &FormData) -> Self {
        VenueForm {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.optional("phone"),
            image_link: data.optional("image_link"),
            facebook_link: data.optional("facebook_link"),
            website_link: data.optional("website_link"),
            genres: data.values("genres"),
            seeking_talent: data.flag("seeking_talent"),
            seeking_description: data.optional("seeking_description"),
        }
    }
}

impl Form for VenueForm {
    type Record = NewVenue;
    const NAME: &'static str = "venue";

    fn validate_record(&self) -> Result<NewVenue, FieldErrors> {
        self.validate()?;

        Ok(NewVenue {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website_link: self.website_link.clone(),
            genres: self.genres.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fillmore() -> FormData {
        FormData::parse(
            "name=The+Fillmore&city=San+Francisco&state=CA&address=1805+Geary+St&genres=Rock+n+Roll",
        )
        .unwrap()
    }

    #[test]
    fn valid_submission_becomes_record() {
        let venue = VenueForm::from_data(&fillmore()).validate_record().unwrap();

        assert_eq!(venue.name, "The Fillmore");
        assert_eq!(venue.city, "San Francisco");
        assert_eq!(venue.state, "CA");
        assert_eq!(venue.address, "1805 Geary St");
        assert_eq!(venue.genres, vec!["Rock n Roll"]);
        assert!(!venue.seeking_talent);
        assert_eq!(venue.image_link, None);
        assert_eq!(venue.seeking_description, None);
    }

    #[test]
    fn reports_every_failing_field() {
        let data = FormData::parse("state=XX&image_link=not-a-url&facebook_link=https%3A%2F%2Ffb.com%2Ffillmore")
            .unwrap();
        let errors = VenueForm::from_data(&data).validate_record().unwrap_err();

        for field in ["name", "city", "state", "address", "genres", "image_link"] {
            assert!(errors.contains(field), "expected error on {}", field);
        }
        assert!(!errors.contains("facebook_link"));
        assert_eq!(errors.get("image_link"), Some(&["Invalid URL.".to_string()][..]));
    }

    #[test]
    fn links_without_a_web_host_are_rejected() {
        for link in ["javascript%3Aalert(1)", "mailto%3Ax%40y.z", "http%3A%2F%2Flocalhost", "foo%3Abar"] {
            let data = FormData::parse(&format!(
                "name=a&city=b&state=NY&address=c&genres=Jazz&image_link={0}&facebook_link={0}",
                link
            ))
            .unwrap();
            let errors = VenueForm::from_data(&data).validate_record().unwrap_err();

            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["facebook_link", "image_link"], "{}", link);
        }
    }

    #[test]
    fn values_longer_than_their_columns_are_rejected() {
        let data = FormData::parse(&format!(
            "name={}&city=b&state=NY&address={}&phone={}&genres=Jazz",
            "n".repeat(121),
            "a".repeat(201),
            "1".repeat(51)
        ))
        .unwrap();
        let errors = VenueForm::from_data(&data).validate_record().unwrap_err();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["address", "name", "phone"]);
        assert_eq!(
            errors.get("name"),
            Some(&["Field cannot be longer than 120 characters.".to_string()][..])
        );

        let fits = FormData::parse(&format!(
            "name={}&city=b&state=NY&address=c&genres=Jazz",
            "n".repeat(120)
        ))
        .unwrap();
        assert!(VenueForm::from_data(&fits).validate_record().is_ok());
    }

    #[test]
    fn padded_values_are_kept_as_submitted() {
        let data = FormData::parse("name=+The+Fillmore+&city=San+Francisco&state=CA&address=1805+Geary+St&genres=Jazz")
            .unwrap();
        let venue = VenueForm::from_data(&data).validate_record().unwrap();

        assert_eq!(venue.name, " The Fillmore ");
    }

    #[test]
    fn website_link_is_free_text() {
        let data = FormData::parse(
            "name=a&city=b&state=NY&address=c&genres=Jazz&website_link=fillmore&seeking_talent=y&seeking_description=Looking",
        )
        .unwrap();
        let venue = VenueForm::from_data(&data).validate_record().unwrap();

        assert_eq!(venue.website_link.as_deref(), Some("fillmore"));
        assert!(venue.seeking_talent);
        assert_eq!(venue.seeking_description.as_deref(), Some("Looking"));
    }
}
